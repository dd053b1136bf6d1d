//! `bargains` command: rebuild and print the bargain snapshot.

use sqlx::PgPool;

pub async fn run(pool: &PgPool, min_discount_percent: f64) -> anyhow::Result<()> {
    let found = pricewatch_db::recompute_bargains(pool, min_discount_percent).await?;
    tracing::info!(found, min_discount_percent, "bargain snapshot rebuilt");

    if found == 0 {
        println!("no bargains at {min_discount_percent:.0}% or better");
        return Ok(());
    }

    let bargains = pricewatch_db::get_bargains(pool, 50, 0).await?;
    println!("{found} bargains at {min_discount_percent:.0}% or better:");
    for bargain in &bargains {
        println!(
            "  {:>5.1}%  {} {} — {} (avg {}, now {}) @ {}",
            bargain.discount_percentage,
            bargain.store,
            bargain.sku,
            bargain.name,
            bargain.avg_price,
            bargain.current_price,
            bargain.locations,
        );
    }
    Ok(())
}
