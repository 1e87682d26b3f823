//! IDF Extract Library
//!
//! A Rust library for turning EnergyPlus IDF building-model files into the
//! structured datasets consumed by report generators.
//!
//! This library provides tools for:
//! - Streaming an IDF file into typed comment/object records tagged with zone context
//! - Extracting simulation settings into a categorised, human-readable table
//! - Collecting unique `Schedule:Compact` definitions and expanding their time rules
//! - Building per-zone load parameters, including derived air-change rates
//! - Associating schedules and thermostats with the zones that reference them
//!
//! All extraction happens in a single synchronous pass; see
//! [`app::services::pipeline::ExtractionPipeline`].

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod idf_reader;
        pub mod pipeline;
        pub mod schedule_extractor;
        pub mod settings_extractor;
        pub mod zone_loads;
        pub mod zone_schedules;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod report;
}

// Re-export commonly used types
pub use app::models::{
    CommentRecord, ObjectRecord, Record, ScheduleDefinition, SetpointLink, SettingsTable,
    ZoneId, ZoneLoadRecord,
};
pub use app::services::pipeline::{ExtractionOutput, ExtractionPipeline, extract_file};
pub use config::ExtractorConfig;

use std::path::PathBuf;

/// Result type alias for IDF extraction
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for IDF extraction operations
///
/// Only source-level failures are errors. A missing or non-numeric field inside
/// an object is represented by [`app::models::FieldValue`], and a settings
/// formatter that cannot use its input degrades to the `"Not Found"` placeholder.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The model file does not exist or cannot be opened
    #[error("Model file not found or unreadable: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred part-way through reading the model file
    #[error("Read failure in '{}' at line {line}", path.display())]
    StreamRead {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration file error in '{}': {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },

    /// Output serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid command-line input
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Output could not be written
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a source-not-found error for a model file
    pub fn source_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceNotFound {
            path: path.into(),
            source,
        }
    }

    /// Create a mid-stream read failure
    pub fn stream_read(path: impl Into<PathBuf>, line: usize, source: std::io::Error) -> Self {
        Self::StreamRead {
            path: path.into(),
            line,
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration file error
    pub fn config_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Whether the error aborted a pass over a model file
    ///
    /// Extractor state is still consistent after these; callers may query the
    /// partial results.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. } | Self::StreamRead { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
