//! `ingest` command: normalize one scraped day file and record its prices.

use std::path::Path;

use anyhow::Context;
use pricewatch_core::IngestRecord;
use pricewatch_normalize::{normalize_category, parse_price, parse_size, NormalizeError};
use serde::Deserialize;
use sqlx::PgPool;

/// One item as the scrapers dump it: size, price, and category are free text
/// straight off the retailer page.
#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub size: String,
    pub price: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "snapEligible")]
    pub snap_eligible: bool,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Turn a raw scraped item into a normalized record ready for storage.
///
/// # Errors
///
/// Returns [`NormalizeError::Price`] when the price text does not reduce to a
/// decimal amount; size and category never fail.
pub fn normalize_item(item: &RawItem) -> Result<IngestRecord, NormalizeError> {
    let price = parse_price(&item.price)?;
    let (quantity, unit) = parse_size(&item.size);

    Ok(IngestRecord {
        sku: item.sku.clone(),
        name: item.name.clone(),
        brand: item.brand.clone(),
        size: quantity.unwrap_or(0.0),
        unit,
        category: item
            .category
            .as_deref()
            .map(|c| normalize_category(c).to_string()),
        snap_eligible: item.snap_eligible,
        price,
        available: item.available,
    })
}

pub async fn run(pool: &PgPool, file: &Path, store: &str, code: &str) -> anyhow::Result<()> {
    let location = pricewatch_db::get_location(pool, store, code)
        .await?
        .with_context(|| {
            format!("location {code} for store '{store}' is not tracked; run sync-locations first")
        })?;

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let items: Vec<RawItem> =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", file.display()))?;

    let mut ingested = 0_usize;
    let mut skipped = 0_usize;
    for item in &items {
        match normalize_item(item) {
            Ok(record) => {
                pricewatch_db::upsert_product_and_price(pool, location.id, &record).await?;
                ingested += 1;
            }
            Err(e) => {
                tracing::warn!(sku = %item.sku, error = %e, "skipping item with unparseable price");
                skipped += 1;
            }
        }
    }

    tracing::info!(store, code, ingested, skipped, "ingest complete");
    println!(
        "ingested {ingested} items ({skipped} skipped) for {store} {}",
        location.name
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_item_accepts_snap_eligible_camel_case() {
        let json = r#"{"sku":"1","name":"Milk","price":"$3.49","snapEligible":true}"#;
        let item: RawItem = serde_json::from_str(json).expect("valid json");
        assert!(item.snap_eligible);
        assert!(item.available, "availability defaults to true");
        assert!(item.brand.is_empty());
    }

    #[test]
    fn normalize_item_parses_size_and_price() {
        let item = RawItem {
            sku: "1".to_string(),
            name: "Cheddar".to_string(),
            brand: "Crystal Farms".to_string(),
            size: "8 oz chunk".to_string(),
            price: "$4.99".to_string(),
            category: Some("Slices, Shreds, Crumbles".to_string()),
            snap_eligible: true,
            available: true,
        };

        let record = normalize_item(&item).expect("normalizes");
        assert!((record.size - 8.0).abs() < f64::EPSILON);
        assert_eq!(record.unit, "oz");
        assert!((record.price - 4.99).abs() < f64::EPSILON);
        assert_eq!(record.category.as_deref(), Some("Dairy & Eggs"));
    }

    #[test]
    fn normalize_item_keeps_absent_category_absent() {
        let item = RawItem {
            sku: "1".to_string(),
            name: "Milk".to_string(),
            brand: String::new(),
            size: String::new(),
            price: "3.49".to_string(),
            category: None,
            snap_eligible: false,
            available: true,
        };

        let record = normalize_item(&item).expect("normalizes");
        assert!(record.category.is_none());
        assert!((record.size - 0.0).abs() < f64::EPSILON);
        assert!(record.unit.is_empty());
    }

    #[test]
    fn normalize_item_rejects_unparseable_price() {
        let item = RawItem {
            sku: "1".to_string(),
            name: "Milk".to_string(),
            brand: String::new(),
            size: String::new(),
            price: "call for price".to_string(),
            category: None,
            snap_eligible: false,
            available: true,
        };

        let err = normalize_item(&item).expect_err("price should not parse");
        assert!(matches!(err, NormalizeError::Price { .. }));
    }
}
