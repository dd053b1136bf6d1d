//! Read-side catalog queries: product search with a current price range,
//! per-product price history, and the export feed for one location.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// Filters for [`search_products`]. `None` means "don't filter on this".
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilters<'a> {
    /// Matched exactly against SKU, or case-insensitively as a substring of
    /// name or brand.
    pub query: Option<&'a str>,
    pub snap_eligible: Option<bool>,
    pub store: Option<&'a str>,
    pub category: Option<&'a str>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSummaryRow {
    pub id: i64,
    pub store: String,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub size: f64,
    pub unit: String,
    pub category: Option<String>,
    pub snap_eligible: bool,
    pub last_seen: NaiveDate,
    /// Lowest price among the product's most recent observation day, if any.
    pub lowest_price: Option<Decimal>,
    pub highest_price: Option<Decimal>,
    /// Availability at the location offering the lowest price.
    pub available: Option<bool>,
}

/// Search the product catalog, attaching each hit's current price range.
///
/// Pagination applies to the filtered product list before prices are
/// attached, so a page always holds `limit` products regardless of how many
/// locations carry them. The price range only considers price points dated
/// exactly on the product's `last_seen` day.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn search_products(
    pool: &PgPool,
    filters: ProductFilters<'_>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ProductSummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductSummaryRow>(
        "WITH product_selection AS ( \
             SELECT id, store, sku, name, brand, size, unit, category, snap_eligible, last_seen \
             FROM products p \
             WHERE ($1::TEXT IS NULL \
                    OR p.sku = $1 \
                    OR p.name ILIKE '%' || $1 || '%' \
                    OR p.brand ILIKE '%' || $1 || '%') \
               AND ($2::BOOLEAN IS NULL OR p.snap_eligible = $2) \
               AND ($3::TEXT IS NULL OR p.store = $3) \
               AND ($4::TEXT IS NULL OR p.category = $4) \
             ORDER BY p.name ASC \
             LIMIT $5 OFFSET $6 \
         ), day_prices AS ( \
             SELECT pr.product_id, pr.price, pr.available, \
                    ROW_NUMBER() OVER (PARTITION BY pr.product_id ORDER BY pr.price ASC) AS price_rank, \
                    COUNT(*) OVER (PARTITION BY pr.product_id) AS price_count \
             FROM prices pr \
             JOIN product_selection ps ON ps.id = pr.product_id \
             WHERE pr.date = ps.last_seen \
         ) \
         SELECT ps.id, ps.store, ps.sku, ps.name, ps.brand, ps.size, ps.unit, ps.category, \
                ps.snap_eligible, ps.last_seen, \
                lo.price AS lowest_price, \
                hi.price AS highest_price, \
                lo.available AS available \
         FROM product_selection ps \
         LEFT JOIN day_prices lo ON lo.product_id = ps.id AND lo.price_rank = 1 \
         LEFT JOIN day_prices hi ON hi.product_id = ps.id AND hi.price_rank = hi.price_count \
         ORDER BY ps.name ASC",
    )
    .bind(filters.query)
    .bind(filters.snap_eligible)
    .bind(filters.store)
    .bind(filters.category)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PriceHistoryRow {
    pub store: String,
    pub date: NaiveDate,
    pub location: String,
    pub zip: String,
    pub price: Decimal,
    pub available: bool,
}

/// Full price history for one product, newest day first, location name
/// breaking ties within a day.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_price_history(
    pool: &PgPool,
    store: &str,
    sku: &str,
) -> Result<Vec<PriceHistoryRow>, DbError> {
    let rows = sqlx::query_as::<_, PriceHistoryRow>(
        "SELECT p.store, pr.date, l.name AS location, l.zip, pr.price, pr.available \
         FROM prices pr \
         JOIN products p ON p.id = pr.product_id \
         JOIN locations l ON l.id = pr.location_id \
         WHERE p.store = $1 AND p.sku = $2 \
         ORDER BY pr.date DESC, l.name ASC",
    )
    .bind(store)
    .bind(sku)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// One observation in a location's export feed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub size: f64,
    pub unit: String,
    pub category: Option<String>,
    pub snap_eligible: bool,
    pub price: Decimal,
    pub available: bool,
}

/// Every price point ever recorded at one location, ordered by day then SKU,
/// ready to be grouped into per-day export files.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_location_prices(
    pool: &PgPool,
    location_id: i64,
) -> Result<Vec<ExportRow>, DbError> {
    let rows = sqlx::query_as::<_, ExportRow>(
        "SELECT pr.date, p.sku, p.name, p.brand, p.size, p.unit, p.category, \
                p.snap_eligible, pr.price, pr.available \
         FROM prices pr \
         JOIN products p ON p.id = pr.product_id \
         WHERE pr.location_id = $1 \
         ORDER BY pr.date ASC, p.sku ASC",
    )
    .bind(location_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
