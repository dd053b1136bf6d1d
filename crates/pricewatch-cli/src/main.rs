use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod bargains;
mod export;
mod ingest;
mod stats;
mod sync_locations;

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Grocery price tracking command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check database connectivity.
    Health,
    /// Apply any pending database migrations.
    Migrate,
    /// Upsert the tracked store roster from the locations config file.
    SyncLocations,
    /// Normalize one scraped day file and record its prices for a location.
    Ingest {
        /// JSON file holding the scraped items.
        file: PathBuf,
        /// Retail chain the file was scraped from, e.g. "Cub".
        #[arg(long)]
        store: String,
        /// Retailer-assigned store code, e.g. "1650".
        #[arg(long)]
        code: String,
    },
    /// Rebuild the bargain snapshot from today's prices.
    Bargains {
        /// Minimum percent below the mean price to qualify; defaults to the
        /// configured threshold.
        #[arg(long)]
        min_discount: Option<f64>,
    },
    /// Recount catalog totals and publish them to the stats table.
    Stats,
    /// Write one location's full price history as per-day JSON files.
    Export {
        #[arg(long)]
        store: String,
        #[arg(long)]
        code: String,
        /// Output directory root.
        #[arg(long, default_value = "data")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pricewatch_core::load_app_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let pool_config = pricewatch_db::PoolConfig::from_app_config(&config);
    let pool = pricewatch_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("connecting to database")?;

    match cli.command {
        Commands::Health => {
            pricewatch_db::ping(&pool).await.context("database ping failed")?;
            println!("database ok");
        }
        Commands::Migrate => {
            let applied = pricewatch_db::run_migrations(&pool).await?;
            println!("applied {applied} migrations");
        }
        Commands::SyncLocations => sync_locations::run(&pool, &config.locations_path).await?,
        Commands::Ingest { file, store, code } => ingest::run(&pool, &file, &store, &code).await?,
        Commands::Bargains { min_discount } => {
            let threshold = min_discount.unwrap_or(config.bargain_min_discount_percent);
            bargains::run(&pool, threshold).await?;
        }
        Commands::Stats => stats::run(&pool).await?,
        Commands::Export { store, code, out } => export::run(&pool, &store, &code, &out).await?,
    }

    Ok(())
}
