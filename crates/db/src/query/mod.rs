//! Parameterized SQL composition for the filtered read paths.
//!
//! Every query is assembled from fixed fragments. Values only ever travel
//! as bound arguments; an absent filter is bound as SQL `NULL` and its
//! predicate degenerates to a no-op (`col = COALESCE($n, col)`, or
//! `$n IS NULL OR ...` for nullable columns), so the statement text for a
//! given shape never depends on which filters are present.

pub mod category;
pub mod record;

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::{Arguments, Encode, Type};

/// SRID of every stored geometry (Swiss LV95).
pub const POSITION_SRID: i32 = 2056;

/// Decimal digits kept when rendering GeoJSON coordinates.
pub const GEOJSON_DIGITS: i32 = 6;

/// A statement ready for `sqlx::query_*_with`.
pub struct Composed {
    pub sql: String,
    pub args: PgArguments,
    /// Number of positional arguments bound.
    pub bound: usize,
}

/// Accumulates positional arguments and hands out their placeholders.
#[derive(Default)]
pub(crate) struct Binder {
    args: PgArguments,
    count: usize,
}

impl Binder {
    /// Bind `value` and return its placeholder (`$1`, `$2`, ...).
    pub(crate) fn bind<'q, T>(&mut self, value: T) -> Result<String, sqlx::Error>
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres>,
    {
        self.args.add(value).map_err(sqlx::Error::Encode)?;
        self.count += 1;
        Ok(format!("${}", self.count))
    }

    pub(crate) fn finish(self, sql: String) -> Composed {
        Composed {
            sql,
            args: self.args,
            bound: self.count,
        }
    }
}

/// `col = COALESCE($n, col)` for a NOT NULL column.
pub(crate) fn eq_or_any(column: &str, placeholder: &str) -> String {
    format!("{column} = COALESCE({placeholder}, {column})")
}

/// `($n::ty IS NULL OR col = $n)` for a nullable column.
pub(crate) fn nullable_eq_or_any(column: &str, placeholder: &str, sql_type: &str) -> String {
    format!("({placeholder}::{sql_type} IS NULL OR {column} = {placeholder})")
}

/// French, accent-insensitive keyword match against a `text_search` column.
pub(crate) fn keywords_or_any(column: &str, placeholder: &str) -> String {
    format!(
        "({placeholder}::text IS NULL OR {column} @@ plainto_tsquery('{config}', unaccent({placeholder})))",
        config = georecord_core::search::SEARCH_CONFIG,
    )
}
