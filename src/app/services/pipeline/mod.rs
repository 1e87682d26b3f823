//! Single-pass extraction pipeline
//!
//! Reads a model file once and hands every record, in file order, to each
//! extractor. The setpoint join between thermostats and zone records runs
//! after the pass.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use idf_extract::{ExtractorConfig, extract_file};
//!
//! # fn example() -> idf_extract::Result<()> {
//! let output = extract_file("in.idf", &ExtractorConfig::default())?;
//! for (zone, record) in &output.zone_loads {
//!     println!("{}: {:?} m3", zone, record.zone_volume);
//! }
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod output;
pub mod sink;

#[cfg(test)]
pub mod tests;

pub use driver::{ExtractionPipeline, PassStats, extract_file};
pub use output::ExtractionOutput;
pub use sink::RecordSink;
