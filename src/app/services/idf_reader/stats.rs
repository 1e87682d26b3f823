//! Reader statistics
//!
//! Counters describing one pass over a model file. They are informational
//! only; nothing in the extraction path depends on them.

use serde::{Deserialize, Serialize};

/// Statistics for one pass of the stream reader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderStats {
    /// Physical lines read
    pub lines_read: usize,

    /// Comment records emitted
    pub comments: usize,

    /// Comment records carrying a recognised settings key
    pub settings_comments: usize,

    /// Object records emitted (fused parts counted individually)
    pub objects: usize,

    /// Object definitions that split into more than one record
    pub fused_objects: usize,

    /// Closed object definitions with no fields at all
    pub empty_objects: usize,

    /// Non-blank lines outside any object that open none
    pub unrecognized_lines: usize,

    /// Zone declarations observed
    pub zones: usize,

    /// Whether an object was still open at end of input
    pub unterminated_at_eof: bool,
}

impl ReaderStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records emitted
    pub fn records(&self) -> usize {
        self.comments + self.objects
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} records ({} objects, {} comments), {} zones, {} unrecognized lines",
            self.lines_read,
            self.records(),
            self.objects,
            self.comments,
            self.zones,
            self.unrecognized_lines
        )
    }
}
