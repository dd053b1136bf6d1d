//! Curated product comparisons ranked by unit price.

use chrono::{DateTime, NaiveDate, Utc};
use pricewatch_core::compare::{rank_by_unit_price, unit_price};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ComparisonRow {
    pub id: i64,
    pub title: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ComparisonMemberRow {
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
    pub lowest_price: Option<Decimal>,
    pub highest_price: Option<Decimal>,
    /// Lowest price divided by size; not a database column, filled in after
    /// the fetch.
    #[sqlx(default)]
    pub unit_price: Option<f64>,
}

/// One comparison with its members sorted best value first.
#[derive(Debug, Clone)]
pub struct ComparisonDetail {
    pub id: i64,
    pub title: String,
    pub created_on: DateTime<Utc>,
    /// Members ascending by unit price, unpriced members last.
    pub products: Vec<ComparisonMemberRow>,
    pub best_value_product_id: Option<i64>,
    /// What the runner-up costs per unit over the best value; `None` with
    /// fewer than two priced members.
    pub savings_per_unit: Option<f64>,
}

/// List all comparisons, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_comparisons(pool: &PgPool) -> Result<Vec<ComparisonRow>, DbError> {
    let rows = sqlx::query_as::<_, ComparisonRow>(
        "SELECT id, title, created_on FROM comparisons ORDER BY created_on DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Create a comparison with the given member products.
///
/// Duplicate product ids in the input collapse to one membership. Returns the
/// new comparison's id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure, including when a product id
/// does not exist.
pub async fn create_comparison(
    pool: &PgPool,
    title: &str,
    product_ids: &[i64],
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar("INSERT INTO comparisons (title) VALUES ($1) RETURNING id")
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO comparison_products (comparison_id, product_id) \
         SELECT $1, unnest($2::BIGINT[]) \
         ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(product_ids)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(id)
}

/// Retitle a comparison and/or replace its member set.
///
/// `None` leaves that aspect untouched. Returns `false` if no comparison has
/// that id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn update_comparison(
    pool: &PgPool,
    id: i64,
    title: Option<&str>,
    product_ids: Option<&[i64]>,
) -> Result<bool, DbError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM comparisons WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Ok(false);
    }

    if let Some(title) = title {
        sqlx::query("UPDATE comparisons SET title = $1 WHERE id = $2")
            .bind(title)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(product_ids) = product_ids {
        sqlx::query("DELETE FROM comparison_products WHERE comparison_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO comparison_products (comparison_id, product_id) \
             SELECT $1, unnest($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(product_ids)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Delete a comparison and its memberships. Returns `false` if no comparison
/// has that id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn delete_comparison(pool: &PgPool, id: i64) -> Result<bool, DbError> {
    let affected = sqlx::query("DELETE FROM comparisons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// Fetch a comparison with its members ranked by unit price.
///
/// Each member carries the price range from its own most recent observation
/// day; unit price is its lowest price divided by its size. Returns `None` if
/// no comparison has that id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_comparison(pool: &PgPool, id: i64) -> Result<Option<ComparisonDetail>, DbError> {
    let Some(header) = sqlx::query_as::<_, ComparisonRow>(
        "SELECT id, title, created_on FROM comparisons WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let mut members = sqlx::query_as::<_, ComparisonMemberRow>(
        "WITH member_products AS ( \
             SELECT p.id, p.store, p.sku, p.name, p.brand, p.size, p.unit, p.category, \
                    p.snap_eligible, p.last_seen \
             FROM comparison_products cp \
             JOIN products p ON p.id = cp.product_id \
             WHERE cp.comparison_id = $1 \
         ), day_prices AS ( \
             SELECT pr.product_id, pr.price, \
                    ROW_NUMBER() OVER (PARTITION BY pr.product_id ORDER BY pr.price ASC) AS price_rank, \
                    COUNT(*) OVER (PARTITION BY pr.product_id) AS price_count \
             FROM prices pr \
             JOIN member_products mp ON mp.id = pr.product_id \
             WHERE pr.date = mp.last_seen \
         ) \
         SELECT mp.id, mp.store, mp.sku, mp.name, mp.brand, mp.size, mp.unit, mp.category, \
                mp.snap_eligible, mp.last_seen, \
                lo.price AS lowest_price, \
                hi.price AS highest_price \
         FROM member_products mp \
         LEFT JOIN day_prices lo ON lo.product_id = mp.id AND lo.price_rank = 1 \
         LEFT JOIN day_prices hi ON hi.product_id = mp.id AND hi.price_rank = hi.price_count \
         ORDER BY mp.store ASC, mp.name ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    for member in &mut members {
        member.unit_price = unit_price(member.lowest_price.and_then(|p| p.to_f64()), member.size);
    }

    let unit_prices: Vec<Option<f64>> = members.iter().map(|m| m.unit_price).collect();
    let ranking = rank_by_unit_price(&unit_prices);
    let best_value_product_id = ranking.best_value.map(|i| members[i].id);
    let products: Vec<ComparisonMemberRow> =
        ranking.order.iter().map(|&i| members[i].clone()).collect();

    Ok(Some(ComparisonDetail {
        id: header.id,
        title: header.title,
        created_on: header.created_on,
        products,
        best_value_product_id,
        savings_per_unit: ranking.savings,
    }))
}
