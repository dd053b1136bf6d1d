//! Domain types and pure logic shared across the pricewatch crates:
//! the ingestion record boundary, application configuration, the store
//! location roster, and comparison ranking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app_config;
pub mod compare;
mod config;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// One normalized catalog observation for a single product at a single
/// location, as produced by the (out-of-scope) retailer scrapers.
///
/// `category` is `None` when the retailer did not supply one; an absent
/// category must never overwrite a previously stored value, so consumers
/// treat `None` strictly as "not supplied", not "clear".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRecord {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub size: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub snap_eligible: bool,
    pub price: f64,
    pub available: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read locations file at {path}")]
    LocationsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse locations file")]
    LocationsFileParse(#[from] serde_yaml::Error),
    #[error("invalid locations config: {0}")]
    Validation(String),
}
