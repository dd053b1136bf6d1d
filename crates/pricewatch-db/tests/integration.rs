//! Offline unit tests for pricewatch-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::NaiveDate;
use pricewatch_core::{AppConfig, Environment};
use pricewatch_db::{BargainRow, PoolConfig, ProductFilters, ProductSummaryRow};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        locations_path: PathBuf::from("./config/locations.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        bargain_min_discount_percent: 10.0,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn product_filters_default_matches_everything() {
    let filters = ProductFilters::default();
    assert!(filters.query.is_none());
    assert!(filters.snap_eligible.is_none());
    assert!(filters.store.is_none());
    assert!(filters.category.is_none());
}

/// Compile-time smoke test: confirm that [`ProductSummaryRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn product_summary_row_has_expected_fields() {
    let day = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let row = ProductSummaryRow {
        id: 42_i64,
        store: "ALDI".to_string(),
        sku: "0000000004061".to_string(),
        name: "Iceberg Lettuce".to_string(),
        brand: "ALDI".to_string(),
        size: 1.0,
        unit: "ea".to_string(),
        category: Some("Fresh Produce".to_string()),
        snap_eligible: true,
        last_seen: day,
        lowest_price: Some(Decimal::new(129, 2)),
        highest_price: Some(Decimal::new(149, 2)),
        available: Some(true),
    };

    assert_eq!(row.id, 42);
    assert_eq!(row.store, "ALDI");
    assert_eq!(row.category.as_deref(), Some("Fresh Produce"));
    assert_eq!(row.lowest_price, Some(Decimal::new(129, 2)));
    assert_eq!(row.available, Some(true));
}

/// Compile-time smoke test: confirm that [`BargainRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn bargain_row_has_expected_fields() {
    let day = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let row = BargainRow {
        id: 1_i64,
        store: "Cub".to_string(),
        sku: "SKU-1".to_string(),
        name: "Cheddar Block".to_string(),
        brand: "Crystal Farms".to_string(),
        size: 8.0,
        unit: "oz".to_string(),
        category: Some("Dairy".to_string()),
        avg_price: Decimal::new(833, 2),
        current_price: Decimal::new(500, 2),
        discount_percentage: 40.0,
        date_identified: day,
        locations: "Maple Grove, Plymouth".to_string(),
    };

    assert_eq!(row.avg_price, Decimal::new(833, 2));
    assert_eq!(row.current_price, Decimal::new(500, 2));
    assert!((row.discount_percentage - 40.0).abs() < f64::EPSILON);
    assert_eq!(row.locations, "Maple Grove, Plymouth");
}
