//! Statements for the `records` table.

use georecord_core::pagination::Page;

use super::{eq_or_any, keywords_or_any, Binder, Composed, GEOJSON_DIGITS, POSITION_SRID};
use crate::models::filter::RecordFilter;

/// List-view projection. Requires the table alias `r`.
pub const SUMMARY_COLUMNS: &str = "\
    r.id, r.type_id, r.name, r.description, r.external_id, r.inactivated, \
    r.validated, r.status, r.created_by, r.created_at, \
    ST_X(r.position) AS pos_x, ST_Y(r.position) AS pos_y";

/// Full projection; the centroid is rounded to centimetres.
pub const FULL_COLUMNS: &str = "\
    r.id, r.type_id, r.name, r.description, r.comment, r.external_id, \
    r.external_ref, r.build_at, r.status, r.contained_by, r.contained_by_old, \
    r.inactivated, r.inactivated_time, r.inactivated_by, r.inactivated_reason, \
    r.validated, r.validated_time, r.validated_by, r.managed_by, \
    r.created_at, r.created_by, r.last_modified_at, r.last_modified_by, \
    r.deleted, r.deleted_at, r.deleted_by, r.more_data, \
    round(ST_X(ST_Centroid(r.position))::numeric, 2)::float8 AS pos_x, \
    round(ST_Y(ST_Centroid(r.position))::numeric, 2)::float8 AS pos_y";

/// Rows visible to list-shaped reads.
const VISIBLE: &str = "r.deleted = false AND r.position IS NOT NULL";

/// Get by primary key. Binds: `$1` id.
pub fn get_sql() -> String {
    format!("SELECT {FULL_COLUMNS} FROM records r WHERE r.id = $1 AND r.deleted = false")
}

/// Shared WHERE tail for the record filter grammar.
fn predicates(b: &mut Binder, filter: &RecordFilter) -> Result<String, sqlx::Error> {
    let type_id = b.bind(filter.type_id)?;
    let created_by = b.bind(filter.created_by)?;
    let inactivated = b.bind(filter.inactivated)?;
    let validated = b.bind(filter.validated)?;
    let keywords = b.bind(filter.keywords.clone())?;
    Ok([
        eq_or_any("r.type_id", &type_id),
        eq_or_any("r.created_by", &created_by),
        eq_or_any("r.inactivated", &inactivated),
        eq_or_any("r.validated", &validated),
        keywords_or_any("r.text_search", &keywords),
    ]
    .join(" AND "))
}

fn paging(b: &mut Binder, page: Page) -> Result<String, sqlx::Error> {
    let limit = b.bind(page.limit)?;
    let offset = b.bind(page.offset)?;
    Ok(format!("ORDER BY r.created_at DESC LIMIT {limit} OFFSET {offset}"))
}

/// List and Search. A `None` keyword makes the two identical.
pub fn list(filter: &RecordFilter, page: Page) -> Result<Composed, sqlx::Error> {
    let mut b = Binder::default();
    let predicates = predicates(&mut b, filter)?;
    let paging = paging(&mut b, page)?;
    Ok(b.finish(format!(
        "SELECT {SUMMARY_COLUMNS} FROM records r \
         WHERE {VISIBLE} AND {predicates} {paging}"
    )))
}

pub fn count(filter: &RecordFilter) -> Result<Composed, sqlx::Error> {
    let mut b = Binder::default();
    let predicates = predicates(&mut b, filter)?;
    Ok(b.finish(format!(
        "SELECT COUNT(*) FROM records r WHERE {VISIBLE} AND {predicates}"
    )))
}

/// A single `FeatureCollection` as text, or `NULL` when nothing matches.
pub fn geojson(filter: &RecordFilter, page: Page) -> Result<Composed, sqlx::Error> {
    let mut b = Binder::default();
    let predicates = predicates(&mut b, filter)?;
    let paging = paging(&mut b, page)?;
    Ok(b.finish(format!(
        "SELECT CASE WHEN COUNT(*) = 0 THEN NULL ELSE \
             json_build_object('type', 'FeatureCollection', 'features', json_agg(f.feature ORDER BY f.created_at DESC))::text \
         END \
         FROM ( \
             SELECT json_build_object( \
                 'type', 'Feature', \
                 'id', r.id, \
                 'geometry', ST_AsGeoJSON(r.position, {GEOJSON_DIGITS})::json, \
                 'properties', json_build_object( \
                     'id', r.id, \
                     'type_id', r.type_id, \
                     'name', r.name, \
                     'description', r.description, \
                     'external_id', r.external_id, \
                     'inactivated', r.inactivated, \
                     'validated', r.validated, \
                     'status', r.status, \
                     'created_by', r.created_by, \
                     'created_at', r.created_at, \
                     'pos_x', ST_X(r.position), \
                     'pos_y', ST_Y(r.position), \
                     'icon_path', c.icon_path \
                 ) \
             ) AS feature, \
             r.created_at \
             FROM records r \
             LEFT JOIN categories c ON c.id = r.type_id \
             WHERE {VISIBLE} AND {predicates} {paging} \
         ) f"
    )))
}

/// List-view rows sharing one external id. Binds: `$1` external id.
pub fn list_by_external_id(external_id: i32, page: Page) -> Result<Composed, sqlx::Error> {
    let mut b = Binder::default();
    let external_id = b.bind(external_id)?;
    let paging = paging(&mut b, page)?;
    Ok(b.finish(format!(
        "SELECT {SUMMARY_COLUMNS} FROM records r \
         WHERE {VISIBLE} AND r.external_id = {external_id} {paging}"
    )))
}

/// Search vector and position expressions shared by INSERT and UPDATE.
/// Both statements bind name, description and comment at `$3..$5`.
fn derived_columns(x: &str, y: &str) -> (String, String) {
    let config = georecord_core::search::SEARCH_CONFIG;
    (
        format!(
            "to_tsvector('{config}', unaccent($3) || ' ' || coalesce(unaccent($4), ' ') || ' ' || coalesce(unaccent($5), ' '))"
        ),
        format!("ST_SetSRID(ST_MakePoint({x}, {y}), {POSITION_SRID})"),
    )
}

/// INSERT. Binds: `$1` id, `$2` type_id, `$3` name, `$4` description,
/// `$5` comment, `$6` external_id, `$7` external_ref, `$8` build_at,
/// `$9` status, `$10` contained_by, `$11` contained_by_old, `$12` validated,
/// `$13` validated_time, `$14` validated_by, `$15` managed_by,
/// `$16` created_by, `$17` more_data, `$18` pos_x, `$19` pos_y.
pub fn insert_sql() -> String {
    let (text_search, position) = derived_columns("$18", "$19");
    format!(
        "INSERT INTO records ( \
             id, type_id, name, description, comment, external_id, external_ref, \
             build_at, status, contained_by, contained_by_old, validated, \
             validated_time, validated_by, managed_by, created_at, created_by, \
             more_data, text_search, position \
         ) VALUES ( \
             $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
             CURRENT_TIMESTAMP, $16, $17, {text_search}, {position} \
         )"
    )
}

/// UPDATE of every client-writable column. Binds: `$1` id, `$2` type_id,
/// `$3` name, `$4` description, `$5` comment, `$6` external_id,
/// `$7` external_ref, `$8` build_at, `$9` status, `$10` contained_by,
/// `$11` contained_by_old, `$12` validated, `$13` validated_time,
/// `$14` validated_by, `$15` managed_by, `$16` inactivated,
/// `$17` inactivated_time, `$18` inactivated_by, `$19` inactivated_reason,
/// `$20` more_data, `$21` pos_x, `$22` pos_y, `$23` last_modified_by.
pub fn update_sql() -> String {
    let (text_search, position) = derived_columns("$21", "$22");
    format!(
        "UPDATE records SET \
             type_id = $2, name = $3, description = $4, comment = $5, \
             external_id = $6, external_ref = $7, build_at = $8, status = $9, \
             contained_by = $10, contained_by_old = $11, validated = $12, \
             validated_time = $13, validated_by = $14, managed_by = $15, \
             inactivated = $16, inactivated_time = $17, inactivated_by = $18, \
             inactivated_reason = $19, more_data = $20, \
             text_search = {text_search}, position = {position}, \
             last_modified_by = $23, last_modified_at = CURRENT_TIMESTAMP \
         WHERE id = $1 AND deleted = false"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::records(None, None)
    }

    #[test]
    fn list_binds_every_filter_and_paging() {
        let q = list(&RecordFilter::default(), page()).unwrap();
        assert_eq!(q.bound, 7);
        assert!(q.sql.contains("r.type_id = COALESCE($1, r.type_id)"));
        assert!(q.sql.contains("r.created_by = COALESCE($2, r.created_by)"));
        assert!(q.sql.contains("r.inactivated = COALESCE($3, r.inactivated)"));
        assert!(q.sql.contains("r.validated = COALESCE($4, r.validated)"));
        assert!(q.sql.contains("$5::text IS NULL"));
        assert!(q.sql.ends_with("ORDER BY r.created_at DESC LIMIT $6 OFFSET $7"));
    }

    #[test]
    fn list_text_does_not_depend_on_filter_values() {
        let empty = list(&RecordFilter::default(), page()).unwrap();
        let full = list(
            &RecordFilter {
                type_id: Some(0),
                created_by: Some(42),
                inactivated: Some(false),
                validated: Some(true),
                keywords: Some("école".into()),
            },
            page(),
        )
        .unwrap();
        assert_eq!(empty.sql, full.sql);
        assert!(!full.sql.contains("école"));
        assert!(!full.sql.contains("42"));
    }

    #[test]
    fn list_hides_deleted_and_unpositioned_rows() {
        let q = list(&RecordFilter::default(), page()).unwrap();
        assert!(q.sql.contains("r.deleted = false AND r.position IS NOT NULL"));
    }

    #[test]
    fn count_has_no_paging() {
        let q = count(&RecordFilter::default()).unwrap();
        assert_eq!(q.bound, 5);
        assert!(q.sql.starts_with("SELECT COUNT(*) FROM records r"));
        assert!(!q.sql.contains("LIMIT"));
    }

    #[test]
    fn geojson_joins_category_icon() {
        let q = geojson(&RecordFilter::default(), page()).unwrap();
        assert_eq!(q.bound, 7);
        assert!(q.sql.contains("LEFT JOIN categories c ON c.id = r.type_id"));
        assert!(q.sql.contains("'icon_path', c.icon_path"));
        assert!(q.sql.contains("ST_AsGeoJSON(r.position, 6)"));
        assert!(q.sql.contains("LIMIT $6 OFFSET $7"));
    }

    #[test]
    fn list_by_external_id_has_one_mandatory_predicate() {
        let q = list_by_external_id(12, page()).unwrap();
        assert_eq!(q.bound, 3);
        assert!(q.sql.contains("r.external_id = $1"));
        assert!(!q.sql.contains("COALESCE"));
        assert!(q.sql.contains("LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn get_rounds_position_and_skips_deleted() {
        let sql = get_sql();
        assert!(sql.contains("round(ST_X(ST_Centroid(r.position))::numeric, 2)"));
        assert!(sql.ends_with("r.id = $1 AND r.deleted = false"));
    }

    #[test]
    fn writes_compute_search_vector_and_position() {
        for sql in [insert_sql(), update_sql()] {
            assert!(sql.contains("to_tsvector('french', unaccent($3)"));
            assert!(sql.contains(", 2056)"));
        }
        assert!(insert_sql().contains("ST_MakePoint($18, $19)"));
        assert!(update_sql().contains("ST_MakePoint($21, $22)"));
    }
}
