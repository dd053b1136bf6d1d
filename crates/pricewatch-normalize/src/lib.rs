//! Text normalization for retailer-specific free-text fields.
//!
//! Scrapers hand us size strings like `"8 x 3 oz Cans"`, price strings like
//! `"$0.27/oz"`, and each retailer's own category labels. This crate turns
//! them into canonical typed values: [`parse_size`], [`parse_price`], and
//! [`normalize_category`]. All functions are pure; the only side channel is
//! a `tracing` event for unmapped category labels.

use thiserror::Error;

mod categories;
mod parse;

pub use categories::{lookup_category, normalize_category, CANONICAL_CATEGORIES};
pub use parse::{parse_price, parse_size};

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Price text that does not reduce to a decimal amount. Ingestion
    /// callers skip the single offending record rather than abort the batch.
    #[error("unparseable price text: {raw:?}")]
    Price { raw: String },
}
