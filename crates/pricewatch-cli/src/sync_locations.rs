//! `sync-locations` command: upsert the tracked store roster.

use std::path::Path;

use sqlx::PgPool;

pub async fn run(pool: &PgPool, locations_path: &Path) -> anyhow::Result<()> {
    let roster = pricewatch_core::stores::load_locations(locations_path)?;

    let mut synced = 0_usize;
    for store in &roster.stores {
        for location in &store.locations {
            let id = pricewatch_db::upsert_location(
                pool,
                &store.store,
                &location.code,
                &location.name,
                &location.zip,
            )
            .await?;
            tracing::debug!(store = %store.store, code = %location.code, id, "location synced");
            synced += 1;
        }
        tracing::info!(store = %store.store, locations = store.locations.len(), "store synced");
    }

    println!("synced {synced} locations across {} stores", roster.stores.len());
    Ok(())
}
