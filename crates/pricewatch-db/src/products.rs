//! Product catalog upserts and the daily price points hanging off them.

use chrono::{NaiveDate, Utc};
use pricewatch_core::IngestRecord;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub store: String,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub size: f64,
    pub unit: String,
    pub category: Option<String>,
    pub snap_eligible: bool,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricePointRow {
    pub id: i64,
    pub product_id: i64,
    pub location_id: i64,
    pub date: NaiveDate,
    pub price: Decimal,
    pub available: bool,
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Record one normalized observation: upsert the product keyed by
/// `(store, sku)` and upsert today's price point for the given location,
/// atomically.
///
/// On an existing product the descriptive fields are overwritten from the
/// record, except that an absent category leaves the stored category in
/// place. `first_seen` never moves; `last_seen` never moves backwards.
/// Re-ingesting the same day's feed overwrites that day's price point
/// rather than adding a second one.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the location id does not exist, or
/// [`DbError::Sqlx`] on query failure.
pub async fn upsert_product_and_price(
    pool: &PgPool,
    location_id: i64,
    record: &IngestRecord,
) -> Result<i64, DbError> {
    let today = today();
    let mut tx = pool.begin().await?;

    let store: Option<String> = sqlx::query_scalar("SELECT store FROM locations WHERE id = $1")
        .bind(location_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(store) = store else {
        return Err(DbError::NotFound);
    };

    let product_id: i64 = sqlx::query_scalar(
        "INSERT INTO products \
             (store, sku, name, brand, size, unit, category, snap_eligible, first_seen, last_seen) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
         ON CONFLICT (store, sku) DO UPDATE SET \
             name = EXCLUDED.name, \
             brand = EXCLUDED.brand, \
             size = EXCLUDED.size, \
             unit = EXCLUDED.unit, \
             category = COALESCE(EXCLUDED.category, products.category), \
             snap_eligible = EXCLUDED.snap_eligible, \
             last_seen = GREATEST(products.last_seen, EXCLUDED.last_seen) \
         RETURNING id",
    )
    .bind(&store)
    .bind(&record.sku)
    .bind(&record.name)
    .bind(&record.brand)
    .bind(record.size)
    .bind(&record.unit)
    .bind(record.category.as_deref())
    .bind(record.snap_eligible)
    .bind(today)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO prices (product_id, location_id, date, price, available) \
         VALUES ($1, $2, $3, $4::numeric(10,2), $5) \
         ON CONFLICT (product_id, location_id, date) DO UPDATE SET \
             price = EXCLUDED.price, \
             available = EXCLUDED.available",
    )
    .bind(product_id)
    .bind(location_id)
    .bind(today)
    .bind(record.price)
    .bind(record.available)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(product_id)
}
