//! `stats` command: recount catalog totals and publish them.

use sqlx::PgPool;

pub async fn run(pool: &PgPool) -> anyhow::Result<()> {
    let counts = pricewatch_db::catalog_counts(pool).await?;

    pricewatch_db::upsert_stat(pool, "stores", &counts.stores.to_string()).await?;
    pricewatch_db::upsert_stat(pool, "locations", &counts.locations.to_string()).await?;
    pricewatch_db::upsert_stat(pool, "products", &counts.products.to_string()).await?;
    pricewatch_db::upsert_stat(pool, "prices", &counts.prices.to_string()).await?;
    tracing::info!(
        stores = counts.stores,
        locations = counts.locations,
        products = counts.products,
        prices = counts.prices,
        "catalog stats published"
    );

    for stat in pricewatch_db::get_stats(pool).await? {
        println!("{:>12}  {}", stat.key, stat.value);
    }
    Ok(())
}
