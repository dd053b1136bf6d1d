//! Store location rows.

use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub store: String,
    pub code: String,
    pub name: String,
    pub zip: String,
}

/// Insert or update a location, keyed by `(store, code)`.
///
/// Returns the location's id whether it was inserted or already present.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn upsert_location(
    pool: &PgPool,
    store: &str,
    code: &str,
    name: &str,
    zip: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO locations (store, code, name, zip) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (store, code) DO UPDATE SET \
             name = EXCLUDED.name, \
             zip = EXCLUDED.zip \
         RETURNING id",
    )
    .bind(store)
    .bind(code)
    .bind(name)
    .bind(zip)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Fetch one location by `(store, code)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_location(
    pool: &PgPool,
    store: &str,
    code: &str,
) -> Result<Option<LocationRow>, DbError> {
    let row = sqlx::query_as::<_, LocationRow>(
        "SELECT id, store, code, name, zip \
         FROM locations \
         WHERE store = $1 AND code = $2",
    )
    .bind(store)
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// List locations, optionally restricted to one retail chain.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_locations(pool: &PgPool, store: Option<&str>) -> Result<Vec<LocationRow>, DbError> {
    let rows = sqlx::query_as::<_, LocationRow>(
        "SELECT id, store, code, name, zip \
         FROM locations \
         WHERE ($1::TEXT IS NULL OR store = $1) \
         ORDER BY store ASC, name ASC",
    )
    .bind(store)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
