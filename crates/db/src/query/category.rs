//! Statements for the `categories` table.

use georecord_core::pagination::Page;

use super::{eq_or_any, keywords_or_any, nullable_eq_or_any, Binder, Composed};
use crate::models::filter::CategoryFilter;

pub const SUMMARY_COLUMNS: &str = "\
    c.id, c.name, c.description, c.external_id, c.table_name, c.geometry_type, \
    c.inactivated, c.managed_by, c.icon_path, c.created_by, c.created_at";

pub const FULL_COLUMNS: &str = "\
    c.id, c.name, c.description, c.comment, c.external_id, c.table_name, \
    c.geometry_type, c.inactivated, c.inactivated_time, c.inactivated_by, \
    c.inactivated_reason, c.managed_by, c.icon_path, c.more_data_schema, \
    c.created_at, c.created_by, c.last_modified_at, c.last_modified_by, \
    c.deleted, c.deleted_at, c.deleted_by";

pub fn get_sql() -> String {
    format!("SELECT {FULL_COLUMNS} FROM categories c WHERE c.id = $1 AND c.deleted = false")
}

fn predicates(b: &mut Binder, filter: &CategoryFilter) -> Result<String, sqlx::Error> {
    let keywords = b.bind(filter.keywords.clone())?;
    let created_by = b.bind(filter.created_by)?;
    let external_id = b.bind(filter.external_id)?;
    let inactivated = b.bind(filter.inactivated)?;
    Ok([
        keywords_or_any("c.text_search", &keywords),
        eq_or_any("c.created_by", &created_by),
        nullable_eq_or_any("c.external_id", &external_id, "int4"),
        eq_or_any("c.inactivated", &inactivated),
    ]
    .join(" AND "))
}

pub fn list(filter: &CategoryFilter, page: Page) -> Result<Composed, sqlx::Error> {
    let mut b = Binder::default();
    let predicates = predicates(&mut b, filter)?;
    let limit = b.bind(page.limit)?;
    let offset = b.bind(page.offset)?;
    Ok(b.finish(format!(
        "SELECT {SUMMARY_COLUMNS} FROM categories c \
         WHERE c.deleted = false AND {predicates} \
         ORDER BY c.name LIMIT {limit} OFFSET {offset}"
    )))
}

pub fn count(filter: &CategoryFilter) -> Result<Composed, sqlx::Error> {
    let mut b = Binder::default();
    let predicates = predicates(&mut b, filter)?;
    Ok(b.finish(format!(
        "SELECT COUNT(*) FROM categories c WHERE c.deleted = false AND {predicates}"
    )))
}

fn text_search() -> String {
    let config = georecord_core::search::SEARCH_CONFIG;
    format!(
        "to_tsvector('{config}', unaccent($1) || ' ' || coalesce(unaccent($2), ' ') || ' ' || coalesce(unaccent($3), ' '))"
    )
}

/// INSERT returning the new id. Binds: `$1` name, `$2` description,
/// `$3` comment, `$4` external_id, `$5` table_name, `$6` geometry_type,
/// `$7` managed_by, `$8` icon_path, `$9` more_data_schema, `$10` created_by.
pub fn insert_sql() -> String {
    format!(
        "INSERT INTO categories ( \
             name, description, comment, external_id, table_name, geometry_type, \
             managed_by, icon_path, more_data_schema, created_by, created_at, text_search \
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, CURRENT_TIMESTAMP, {}) \
         RETURNING id",
        text_search()
    )
}

/// UPDATE. Binds `$1..$9` as for INSERT, then `$10` inactivated,
/// `$11` inactivated_time, `$12` inactivated_by, `$13` inactivated_reason,
/// `$14` last_modified_by, `$15` id.
pub fn update_sql() -> String {
    format!(
        "UPDATE categories SET \
             name = $1, description = $2, comment = $3, external_id = $4, \
             table_name = $5, geometry_type = $6, managed_by = $7, icon_path = $8, \
             more_data_schema = $9, inactivated = $10, inactivated_time = $11, \
             inactivated_by = $12, inactivated_reason = $13, \
             last_modified_by = $14, last_modified_at = CURRENT_TIMESTAMP, \
             text_search = {} \
         WHERE id = $15 AND deleted = false",
        text_search()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_orders_by_name() {
        let q = list(&CategoryFilter::default(), Page::categories(None, None)).unwrap();
        assert_eq!(q.bound, 6);
        assert!(q.sql.ends_with("ORDER BY c.name LIMIT $5 OFFSET $6"));
    }

    #[test]
    fn nullable_external_id_does_not_hide_rows_without_one() {
        let q = count(&CategoryFilter::default()).unwrap();
        assert_eq!(q.bound, 4);
        assert!(q.sql.contains("($3::int4 IS NULL OR c.external_id = $3)"));
    }

    #[test]
    fn keyword_predicate_uses_search_vector() {
        let q = count(&CategoryFilter {
            keywords: Some("réseau".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(q.sql.contains("c.text_search @@ plainto_tsquery('french', unaccent($1))"));
        assert!(!q.sql.contains("réseau"));
    }

    #[test]
    fn insert_returns_generated_id() {
        assert!(insert_sql().ends_with("RETURNING id"));
    }
}
