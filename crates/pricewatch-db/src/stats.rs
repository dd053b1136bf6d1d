//! Key/value stats published for dashboards, plus the catalog counts that
//! feed them.

use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatRow {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct CatalogCounts {
    pub stores: i64,
    pub locations: i64,
    pub products: i64,
    pub prices: i64,
}

/// Insert or overwrite one stat.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn upsert_stat(pool: &PgPool, key: &str, value: &str) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO stats (key, value) VALUES ($1, $2) \
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// All published stats, ordered by key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_stats(pool: &PgPool) -> Result<Vec<StatRow>, DbError> {
    let rows = sqlx::query_as::<_, StatRow>("SELECT key, value FROM stats ORDER BY key ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Clear every published stat.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn delete_all_stats(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("DELETE FROM stats").execute(pool).await?;
    Ok(())
}

/// Current catalog totals: distinct retail chains, tracked locations,
/// products, and recorded price points.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn catalog_counts(pool: &PgPool) -> Result<CatalogCounts, DbError> {
    let counts = sqlx::query_as::<_, CatalogCounts>(
        "SELECT (SELECT COUNT(DISTINCT store) FROM locations) AS stores, \
                (SELECT COUNT(*) FROM locations) AS locations, \
                (SELECT COUNT(*) FROM products) AS products, \
                (SELECT COUNT(*) FROM prices) AS prices",
    )
    .fetch_one(pool)
    .await?;

    Ok(counts)
}
