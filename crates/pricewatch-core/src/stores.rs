//! Store location roster loaded from `config/locations.yaml`.
//!
//! The roster is the authoritative list of which physical stores we track;
//! the CLI `sync-locations` command upserts it into the catalog.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One physical store location within a retail chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Retailer-assigned store code, e.g. `"472-010"`.
    pub code: String,
    pub name: String,
    pub zip: String,
}

/// A retail chain and its tracked locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub store: String,
    pub locations: Vec<LocationConfig>,
}

#[derive(Debug, Deserialize)]
pub struct LocationsFile {
    pub stores: Vec<StoreConfig>,
}

/// Load and validate the locations roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_locations(path: &Path) -> Result<LocationsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LocationsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let locations_file: LocationsFile = serde_yaml::from_str(&content)?;
    validate_locations(&locations_file)?;

    Ok(locations_file)
}

fn validate_locations(file: &LocationsFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for store in &file.stores {
        if store.store.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_string(),
            ));
        }
        if store.locations.is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has no locations",
                store.store
            )));
        }

        for location in &store.locations {
            if location.code.trim().is_empty() || location.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "store '{}' has a location with an empty code or name",
                    store.store
                )));
            }
            if !seen_codes.insert((store.store.clone(), location.code.clone())) {
                return Err(ConfigError::Validation(format!(
                    "duplicate location code '{}' for store '{}'",
                    location.code, store.store
                )));
            }
        }
    }

    Ok(())
}
