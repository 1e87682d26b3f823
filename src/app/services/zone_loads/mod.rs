//! Zone load-data extraction
//!
//! - [`field_parsers`] - Positional field access returning [`FieldValue`](crate::app::models::FieldValue)
//! - [`decoders`] - One fixed-shape struct per recognised keyword
//! - [`heuristics`] - Substring classification rules
//! - [`extractor`] - The record sink building per-zone records and setpoint links
//!
//! Setpoint schedules are attached to zones after the pass with
//! [`apply_setpoint_links`].

pub mod decoders;
pub mod extractor;
pub mod field_parsers;
pub mod heuristics;

#[cfg(test)]
pub mod tests;

pub use decoders::LoadObject;
pub use extractor::{ZoneLoadExtractor, apply_setpoint_links, derive_air_changes};
pub use field_parsers::{optional_string, parse_optional_float};
