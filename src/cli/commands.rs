//! Command implementations for the IDF extractor CLI
//!
//! This module contains the command execution logic, input discovery,
//! progress reporting and output writing for the CLI interface.

use crate::app::models::{ScheduleDefinition, SetpointLink, SettingsTable, ZoneId, ZoneLoadRecord};
use crate::app::services::idf_reader::ReaderStats;
use crate::app::services::pipeline::{ExtractionOutput, ExtractionPipeline};
use crate::app::services::schedule_extractor::expand_time_value_pairs_with_resolution;
use crate::cli::args::{Args, Commands, ExpandArgs, ExtractArgs, OutputFormat, Section, ValidateArgs};
use crate::cli::report;
use crate::config::ExtractorConfig;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use indexmap::{IndexMap, IndexSet};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Extension of model files picked up from directories
const IDF_EXTENSION: &str = "idf";

/// Run statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files read to the end
    pub files_processed: usize,
    /// Files missing or aborted part-way
    pub files_failed: usize,
    /// Records delivered across all files
    pub records_read: usize,
    /// Total run time
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

/// Main command runner
///
/// 1. Set up logging and configuration
/// 2. Dispatch to the selected command
/// 3. Report summary statistics
pub fn run(args: Args) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = ExtractorConfig::load_layered(args.config_file.as_deref())?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = &args.command else {
        return Err(Error::invalid_argument("No command given"));
    };

    let mut summary = match command {
        Commands::Extract(extract) => run_extract(&args, extract, config)?,
        Commands::Expand(expand) => run_expand(expand, &config)?,
        Commands::Validate(validate) => run_validate(&args, validate, &config)?,
    };
    summary.elapsed = start_time.elapsed();

    if !args.quiet && !matches!(command, Commands::Expand(_)) {
        print_summary(&summary);
    }
    Ok(summary)
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("idf_extract={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand CLI inputs into model file paths
///
/// Directories are walked for `*.idf` files, existing paths are taken as-is,
/// and anything else containing glob metacharacters is matched as a pattern.
/// A plain path that does not exist is kept so the reader reports it.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: IndexSet<PathBuf> = IndexSet::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_dir() {
            let found = discover_idf_files(path);
            if found.is_empty() {
                warn!("No .{} files under {}", IDF_EXTENSION, path.display());
            }
            files.extend(found);
        } else if path.exists() || !is_glob_pattern(input) {
            files.insert(path.to_path_buf());
        } else {
            let entries = glob::glob(input).map_err(|e| {
                Error::invalid_argument(format!("Invalid glob pattern '{}': {}", input, e))
            })?;

            let before = files.len();
            for entry in entries {
                match entry {
                    Ok(matched) if matched.is_file() => {
                        files.insert(matched);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping {}: {}", e.path().display(), e.error()),
                }
            }
            if files.len() == before {
                warn!("Pattern '{}' matched no files", input);
            }
        }
    }

    if files.is_empty() {
        return Err(Error::invalid_argument("No input files found"));
    }

    debug!("Resolved {} input files", files.len());
    Ok(files.into_iter().collect())
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Recursively find model files under `dir`, sorted by path
pub fn discover_idf_files(dir: &Path) -> Vec<PathBuf> {
    let mut idf_files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(IDF_EXTENSION))
        })
        .collect();

    idf_files.sort();
    debug!("Discovered {} IDF files in {}", idf_files.len(), dir.display());
    idf_files
}

fn progress_bar(args: &Args, len: usize) -> Option<ProgressBar> {
    if !args.show_progress() || len < 2 {
        return None;
    }

    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    Some(pb)
}

/// Result of extracting one file
#[derive(Debug, Clone)]
pub struct FileExtraction {
    pub source: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// Whole file read
    pub complete: bool,
    pub error: Option<String>,
    pub records: usize,
    /// Present unless the file could not be opened
    pub output: Option<ExtractionOutput>,
}

/// Run every extractor over `path`, keeping partial results on a read failure
pub fn extract_one(path: &Path, config: &ExtractorConfig) -> FileExtraction {
    let generated_at = Utc::now();
    let mut pipeline = ExtractionPipeline::new(config.clone());

    let mut reader = match pipeline.open_reader(path) {
        Ok(reader) => reader,
        Err(e) => {
            error!("{}", e);
            return FileExtraction {
                source: path.to_path_buf(),
                generated_at,
                complete: false,
                error: Some(e.to_string()),
                records: 0,
                output: None,
            };
        }
    };

    let outcome = pipeline.consume(&mut reader);
    let records = pipeline.records_seen();
    let output = Some(pipeline.into_output());

    match outcome {
        Ok(_) => FileExtraction {
            source: path.to_path_buf(),
            generated_at,
            complete: true,
            error: None,
            records,
            output,
        },
        Err(e) => {
            warn!("Keeping partial results for {}: {}", path.display(), e);
            FileExtraction {
                source: path.to_path_buf(),
                generated_at,
                complete: false,
                error: Some(e.to_string()),
                records,
                output,
            }
        }
    }
}

/// JSON shape of one file's extraction, limited to the selected sections
#[derive(Debug, Serialize)]
struct ExtractionDocument<'a> {
    source: &'a Path,
    generated_at: DateTime<Utc>,
    complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<&'a SettingsTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedules: Option<&'a [ScheduleDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone_loads: Option<&'a IndexMap<ZoneId, ZoneLoadRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    setpoint_links: Option<&'a IndexMap<String, SetpointLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone_schedules: Option<&'a BTreeMap<ZoneId, BTreeSet<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thermostat_zones: Option<&'a BTreeSet<ZoneId>>,
}

impl<'a> ExtractionDocument<'a> {
    fn new(extraction: &'a FileExtraction, sections: &[Section]) -> Self {
        let output = extraction.output.as_ref();
        let pick = |section: Section| output.filter(|_| sections.contains(&section));

        Self {
            source: &extraction.source,
            generated_at: extraction.generated_at,
            complete: extraction.complete,
            error: extraction.error.as_deref(),
            settings: pick(Section::Settings).map(|o| &o.settings),
            schedules: pick(Section::Schedules).map(|o| o.schedules.as_slice()),
            zone_loads: pick(Section::ZoneLoads).map(|o| &o.zone_loads),
            setpoint_links: pick(Section::ZoneLoads).map(|o| &o.setpoint_links),
            zone_schedules: pick(Section::ZoneSchedules).map(|o| &o.zone_schedules),
            thermostat_zones: pick(Section::Thermostats).map(|o| &o.thermostat_zones),
        }
    }
}

/// Render extraction results in the requested format
pub fn render_extractions(
    extractions: &[FileExtraction],
    sections: &[Section],
    format: OutputFormat,
    slot_minutes: u32,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let documents: Vec<ExtractionDocument> = extractions
                .iter()
                .map(|extraction| ExtractionDocument::new(extraction, sections))
                .collect();
            let mut json = match documents.as_slice() {
                [single] => serde_json::to_string_pretty(single)?,
                _ => serde_json::to_string_pretty(&documents)?,
            };
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut text = String::new();
            for extraction in extractions {
                match &extraction.output {
                    Some(output) => text.push_str(&report::render_extraction(
                        &extraction.source,
                        output,
                        sections,
                        slot_minutes,
                    )),
                    None => text.push_str(&format!(
                        "{} {}\n",
                        extraction.source.display(),
                        "not read".red()
                    )),
                }
                if let Some(error) = &extraction.error {
                    text.push_str(&format!("{} {}\n", "incomplete:".yellow(), error));
                }
                text.push('\n');
            }
            Ok(text)
        }
    }
}

fn run_extract(args: &Args, extract: &ExtractArgs, mut config: ExtractorConfig) -> Result<RunSummary> {
    extract.validate()?;
    if let Some(engine_name) = &extract.engine_name {
        config = config.with_engine_name(engine_name.clone());
    }

    let files = resolve_inputs(&extract.inputs)?;
    let sections = extract.selected_sections();
    info!("Extracting {} files: {:?}", files.len(), sections);

    let progress = progress_bar(args, files.len());
    let mut summary = RunSummary::default();
    let mut extractions = Vec::with_capacity(files.len());

    for file in &files {
        if let Some(pb) = &progress {
            pb.set_message(format!("{}", file.display()));
        }

        let extraction = extract_one(file, &config);
        summary.records_read += extraction.records;
        if extraction.complete {
            summary.files_processed += 1;
        } else {
            summary.files_failed += 1;
        }
        extractions.push(extraction);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let rendered = render_extractions(
        &extractions,
        &sections,
        extract.format,
        config.expansion_slot_minutes,
    )?;
    write_output(&rendered, extract.output.as_deref())?;
    Ok(summary)
}

fn run_expand(expand: &ExpandArgs, config: &ExtractorConfig) -> Result<RunSummary> {
    let slot_minutes = expand.slot_minutes.unwrap_or(config.expansion_slot_minutes);
    config
        .clone()
        .with_expansion_slot_minutes(slot_minutes)
        .validate()?;

    let pairs: Vec<_> = expand.pairs.iter().map(|pair| pair.0.clone()).collect();
    let values = expand_time_value_pairs_with_resolution(&pairs, slot_minutes);
    debug!("Expanded {} pairs into {} slots", pairs.len(), values.len());

    let rendered = match expand.format {
        OutputFormat::Json => {
            let document = serde_json::json!({
                "slot_minutes": slot_minutes,
                "pairs": pairs,
                "values": values,
            });
            format!("{}\n", serde_json::to_string_pretty(&document)?)
        }
        OutputFormat::Text => report::render_expansion(&values, slot_minutes),
    };
    write_output(&rendered, None)?;

    Ok(RunSummary::default())
}

/// Reader statistics for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileValidation {
    pub source: PathBuf,
    pub error: Option<String>,
    pub stats: ReaderStats,
}

/// Read `path` to the end without extracting anything
pub fn validate_one(path: &Path, config: &ExtractorConfig) -> FileValidation {
    let pipeline = ExtractionPipeline::new(config.clone());
    let mut reader = match pipeline.open_reader(path) {
        Ok(reader) => reader,
        Err(e) => {
            return FileValidation {
                source: path.to_path_buf(),
                error: Some(e.to_string()),
                stats: ReaderStats::new(),
            };
        }
    };

    let error = reader.by_ref().find_map(|item| item.err()).map(|e| {
        warn!("{}", e);
        e.to_string()
    });

    FileValidation {
        source: path.to_path_buf(),
        error,
        stats: reader.stats().clone(),
    }
}

fn run_validate(args: &Args, validate: &ValidateArgs, config: &ExtractorConfig) -> Result<RunSummary> {
    let files = resolve_inputs(&validate.inputs)?;
    let progress = progress_bar(args, files.len());
    let mut summary = RunSummary::default();
    let mut validations = Vec::with_capacity(files.len());

    for file in &files {
        let validation = validate_one(file, config);
        summary.records_read += validation.stats.records();
        if validation.error.is_none() {
            summary.files_processed += 1;
        } else {
            summary.files_failed += 1;
        }
        validations.push(validation);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let rendered = match validate.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&validations)?),
        OutputFormat::Text => validations
            .iter()
            .map(|v| report::render_validation(&v.source, &v.stats, v.error.as_deref()))
            .collect(),
    };
    write_output(&rendered, None)?;
    Ok(summary)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                Error::io(format!("Failed to write output file '{}'", path.display()), e)
            })?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let status = if summary.has_failures() {
        format!("{} failed", summary.files_failed).red().bold()
    } else {
        "all complete".green().bold()
    };
    eprintln!(
        "{} files, {} records in {} ({})",
        summary.files_processed + summary.files_failed,
        summary.records_read,
        HumanDuration(summary.elapsed),
        status
    );
}
