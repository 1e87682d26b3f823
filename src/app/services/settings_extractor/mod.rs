//! Settings extraction
//!
//! Turns the settings catalog keys found in a model file into a
//! category -> key -> human-readable value table.
//!
//! - [`catalog`] - Keyword normalisation and catalog lookup
//! - [`formatters`] - Per-keyword formatting with `"Not Found"` fallback
//! - [`extractor`] - The record sink building the table

pub mod catalog;
pub mod extractor;
pub mod formatters;

#[cfg(test)]
pub mod tests;

pub use catalog::{SettingsCatalog, normalize_keyword};
pub use extractor::SettingsExtractor;
pub use formatters::SettingKind;
