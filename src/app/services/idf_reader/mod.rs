//! Streaming IDF reader
//!
//! This module turns a model file into a forward-only sequence of
//! [`Record`](crate::app::models::Record)s, each tagged with the zone context
//! in effect when it was emitted.
//!
//! ## Architecture
//!
//! - [`line`] - Line pre-processing: inline comment stripping, keyword and terminator detection
//! - [`zone_context`] - Tracks the most recently declared zone
//! - [`reader`] - Multi-line object accumulation, field extraction and fused-object splitting
//! - [`stats`] - Counters describing one pass
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::collections::HashSet;
//! use idf_extract::app::services::idf_reader::IdfReader;
//!
//! # fn example() -> idf_extract::Result<()> {
//! let reader = IdfReader::open("in.idf", HashSet::new(), '!')?;
//! for record in reader {
//!     let record = record?;
//!     println!("{:?} in zone {:?}", record, record.zone());
//! }
//! # Ok(())
//! # }
//! ```

pub mod line;
pub mod reader;
pub mod stats;
pub mod zone_context;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use line::strip_inline_comment;
pub use reader::IdfReader;
pub use stats::ReaderStats;
pub use zone_context::ZoneContext;
