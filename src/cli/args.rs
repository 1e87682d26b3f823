//! Command-line argument definitions for the IDF extractor
//!
//! This module defines the CLI interface using the clap derive API. Global
//! flags (configuration file, verbosity) apply to every subcommand.

use crate::app::models::TimeValuePair;
use crate::app::services::schedule_extractor::validate_time_format;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the IDF extractor
///
/// Streams EnergyPlus IDF model files and extracts simulation settings,
/// schedules and per-zone load data for report generation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "idf-extract",
    version,
    about = "Extract settings, schedules and zone loads from EnergyPlus IDF models",
    long_about = "Reads EnergyPlus IDF building-model files in a single streaming pass and \
                  extracts the simulation settings table, unique compact schedules, per-zone \
                  load parameters with derived air-change rates, and the schedules and \
                  thermostats associated with each zone."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// TOML configuration file overriding the settings catalog and name
    /// heuristics. If not specified, looks for ~/.config/idf-extract/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract datasets from one or more IDF files
    Extract(ExtractArgs),
    /// Expand Until/value pairs into a day vector
    Expand(ExpandArgs),
    /// Read IDF files and report reader statistics only
    Validate(ValidateArgs),
}

/// Arguments for the extract command
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Input files, directories or glob patterns
    ///
    /// Directories are searched recursively for `*.idf` files.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Sections to include (comma-separated); all when omitted
    #[arg(
        short = 's',
        long = "section",
        value_enum,
        value_delimiter = ',',
        help = "Sections to include in the output"
    )]
    pub sections: Vec<Section>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Output file; stdout when omitted
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write results to this file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Override the engine name used in the Version setting
    #[arg(long = "engine-name", value_name = "NAME")]
    pub engine_name: Option<String>,
}

/// Arguments for the expand command
#[derive(Debug, Clone, Parser)]
pub struct ExpandArgs {
    /// `HH:MM=VALUE` pair, repeatable, in schedule order
    #[arg(
        short = 'p',
        long = "pair",
        value_name = "HH:MM=VALUE",
        required = true,
        help = "Until time and value, e.g. --pair 08:00=0.1 --pair 24:00=0.9"
    )]
    pub pairs: Vec<PairArg>,

    /// Slot width in minutes; configuration default when omitted
    #[arg(long = "slot-minutes", value_name = "MINUTES")]
    pub slot_minutes: Option<u32>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for results"
    )]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Input files, directories or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for results"
    )]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON format for scripting
    Json,
}

/// Extraction result sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Section {
    Settings,
    Schedules,
    ZoneLoads,
    ZoneSchedules,
    Thermostats,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Settings,
        Section::Schedules,
        Section::ZoneLoads,
        Section::ZoneSchedules,
        Section::Thermostats,
    ];
}

/// One `HH:MM=VALUE` pair from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairArg(pub TimeValuePair);

impl FromStr for PairArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (time, value) = s.split_once('=').ok_or_else(|| {
            Error::invalid_argument(format!("Expected HH:MM=VALUE, got '{}'", s))
        })?;

        let time = time.trim();
        if !validate_time_format(time) {
            return Err(Error::invalid_argument(format!(
                "Invalid time '{}', expected HH:MM between 00:00 and 24:00",
                time
            )));
        }

        Ok(PairArg(TimeValuePair::new(time, value.trim())))
    }
}

impl Args {
    /// Validate global arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ExtractArgs {
    /// Requested sections, all of them when none were named
    pub fn selected_sections(&self) -> Vec<Section> {
        if self.sections.is_empty() {
            Section::ALL.to_vec()
        } else {
            let mut sections = self.sections.clone();
            sections.dedup();
            sections
        }
    }

    /// Validate the extract command arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }
        Ok(())
    }
}
