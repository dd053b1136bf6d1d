//! Bargain snapshot: products selling well below their cross-location
//! average price today.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{products::today, DbError};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BargainRow {
    pub id: i64,
    pub store: String,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub size: f64,
    pub unit: String,
    pub category: Option<String>,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub discount_percentage: f64,
    pub date_identified: NaiveDate,
    /// Comma-separated names of the locations carrying the product today.
    pub locations: String,
}

/// Rebuild the bargain snapshot from today's available price points.
///
/// The previous snapshot is discarded entirely; a product qualifies when its
/// cheapest available price today sits at least `min_discount_percent` below
/// its mean available price today across locations. Each qualifying bargain
/// records every location carrying the product today with that location's own
/// price. Returns the number of bargains in the new snapshot.
///
/// The delete and both inserts run in one transaction, so readers never see a
/// half-built snapshot.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn recompute_bargains(pool: &PgPool, min_discount_percent: f64) -> Result<u64, DbError> {
    let today = today();
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM bargain_locations")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM bargains").execute(&mut *tx).await?;

    let inserted = sqlx::query(
        "WITH current_prices AS ( \
             SELECT product_id, location_id, price \
             FROM prices \
             WHERE date = $1 AND available \
         ), product_stats AS ( \
             SELECT product_id, \
                    MIN(price) AS min_price, \
                    AVG(price) AS avg_price, \
                    ((AVG(price) - MIN(price)) / AVG(price) * 100)::float8 AS discount \
             FROM current_prices \
             GROUP BY product_id \
             HAVING AVG(price) > 0 \
         ) \
         INSERT INTO bargains (product_id, avg_price, current_price, discount_percentage, date_identified) \
         SELECT product_id, avg_price, min_price, discount, $1 \
         FROM product_stats \
         WHERE discount >= $2",
    )
    .bind(today)
    .bind(min_discount_percent)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    sqlx::query(
        "INSERT INTO bargain_locations (bargain_id, location_id, price) \
         SELECT b.id, pr.location_id, pr.price \
         FROM bargains b \
         JOIN prices pr ON pr.product_id = b.product_id \
         WHERE pr.date = $1 AND pr.available",
    )
    .bind(today)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(inserted)
}

/// List the current bargain snapshot, steepest discount first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_bargains(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<BargainRow>, DbError> {
    let rows = sqlx::query_as::<_, BargainRow>(
        "SELECT b.id, p.store, p.sku, p.name, p.brand, p.size, p.unit, p.category, \
                b.avg_price, b.current_price, b.discount_percentage, b.date_identified, \
                string_agg(l.name, ', ' ORDER BY l.name) AS locations \
         FROM bargains b \
         JOIN products p ON p.id = b.product_id \
         JOIN bargain_locations bl ON bl.bargain_id = b.id \
         JOIN locations l ON l.id = bl.location_id \
         GROUP BY b.id, p.id \
         ORDER BY b.discount_percentage DESC \
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
