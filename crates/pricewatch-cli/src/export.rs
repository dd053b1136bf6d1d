//! `export` command: dump one location's price history as per-day JSON files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use pricewatch_db::ExportRow;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use sqlx::PgPool;

/// One exported observation; field names match the scrapers' day-file shape
/// so exports can be re-ingested.
#[derive(Debug, Serialize)]
struct ExportItem {
    sku: String,
    name: String,
    brand: String,
    size: f64,
    unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(rename = "snapEligible")]
    snap_eligible: bool,
    price: f64,
    available: bool,
}

impl From<ExportRow> for ExportItem {
    fn from(row: ExportRow) -> Self {
        Self {
            sku: row.sku,
            name: row.name,
            brand: row.brand,
            size: row.size,
            unit: row.unit,
            category: row.category,
            snap_eligible: row.snap_eligible,
            price: row.price.to_f64().unwrap_or_default(),
            available: row.available,
        }
    }
}

pub async fn run(pool: &PgPool, store: &str, code: &str, out_dir: &Path) -> anyhow::Result<()> {
    let location = pricewatch_db::get_location(pool, store, code)
        .await?
        .with_context(|| format!("location {code} for store '{store}' is not tracked"))?;

    let rows = pricewatch_db::list_location_prices(pool, location.id).await?;

    let mut days: BTreeMap<NaiveDate, Vec<ExportItem>> = BTreeMap::new();
    for row in rows {
        days.entry(row.date).or_default().push(ExportItem::from(row));
    }

    let dir = out_dir.join(store).join(&location.code);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    for (date, items) in &days {
        let path = dir.join(format!("{date}.json"));
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(%date, items = items.len(), "day file written");
    }

    println!("wrote {} day files to {}", days.len(), dir.display());
    Ok(())
}
