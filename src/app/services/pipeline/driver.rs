//! Pipeline driver
//!
//! Owns one instance of every extractor and feeds them in lock-step from a
//! single reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::output::ExtractionOutput;
use super::sink::RecordSink;
use crate::Result;
use crate::app::services::idf_reader::{IdfReader, ReaderStats};
use crate::app::services::schedule_extractor::ScheduleExtractor;
use crate::app::services::settings_extractor::SettingsExtractor;
use crate::app::services::zone_loads::{ZoneLoadExtractor, apply_setpoint_links};
use crate::app::services::zone_schedules::{ThermostatZoneExtractor, ZoneScheduleExtractor};
use crate::config::ExtractorConfig;

/// Summary of one completed pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassStats {
    pub source: PathBuf,
    pub reader: ReaderStats,
    pub duration: Duration,
}

impl PassStats {
    pub fn records_per_second(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds > 0.0 {
            self.reader.records() as f64 / seconds
        } else {
            0.0
        }
    }
}

/// All extractors for one model file
///
/// Results stay queryable after a failed pass: whatever was consumed before
/// the failure is reflected in [`ExtractionPipeline::into_output`].
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    config: ExtractorConfig,
    settings: SettingsExtractor,
    schedules: ScheduleExtractor,
    zone_loads: ZoneLoadExtractor,
    zone_schedules: ZoneScheduleExtractor,
    thermostat_zones: ThermostatZoneExtractor,
    records_seen: usize,
}

impl ExtractionPipeline {
    /// Create fresh extractors for `config`
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            settings: SettingsExtractor::new(&config),
            schedules: ScheduleExtractor::new(&config),
            zone_loads: ZoneLoadExtractor::new(&config),
            zone_schedules: ZoneScheduleExtractor::new(),
            thermostat_zones: ThermostatZoneExtractor::new(),
            records_seen: 0,
            config,
        }
    }

    /// Configuration the extractors were built from
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Records delivered so far
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    /// Open `path` with this pipeline's lexical settings
    pub fn open_reader(&self, path: impl AsRef<Path>) -> Result<IdfReader<BufReader<File>>> {
        IdfReader::open(
            path,
            self.config.settings.comment_keys(),
            self.config.comment_marker,
        )
    }

    /// Drain `reader`, fanning each record out to every extractor
    ///
    /// A stream failure is returned as-is; extractor state keeps everything
    /// delivered before it.
    pub fn consume<R: BufRead>(&mut self, reader: &mut IdfReader<R>) -> Result<PassStats> {
        let started = Instant::now();
        info!(
            "Extracting from {} into [{}]",
            reader.source().display(),
            self.sink_names().join(", ")
        );

        for item in reader.by_ref() {
            let record = match item {
                Ok(record) => record,
                Err(e) => {
                    warn!("Stream aborted after {} records: {}", self.records_seen, e);
                    return Err(e);
                }
            };

            for sink in self.sinks() {
                sink.process(&record);
            }
            self.records_seen += 1;
        }

        let stats = PassStats {
            source: reader.source().to_path_buf(),
            reader: reader.stats().clone(),
            duration: started.elapsed(),
        };
        info!(
            "Extracted {} in {:.2?}: {}",
            stats.source.display(),
            stats.duration,
            stats.reader.summary()
        );
        Ok(stats)
    }

    /// Names of the extractors, in delivery order
    pub fn sink_names(&self) -> [&'static str; 5] {
        [
            self.settings.name(),
            self.schedules.name(),
            self.zone_loads.name(),
            self.zone_schedules.name(),
            self.thermostat_zones.name(),
        ]
    }

    fn sinks(&mut self) -> [&mut dyn RecordSink; 5] {
        [
            &mut self.settings,
            &mut self.schedules,
            &mut self.zone_loads,
            &mut self.zone_schedules,
            &mut self.thermostat_zones,
        ]
    }

    /// Freeze the results, applying the thermostat setpoint join
    pub fn into_output(self) -> ExtractionOutput {
        let mut zone_loads = self.zone_loads.zone_load_data();
        let setpoint_links = self.zone_loads.setpoint_links().clone();
        apply_setpoint_links(&mut zone_loads, &setpoint_links);

        debug!(
            "Output: {} schedules, {} zones, {} setpoint links, {} field anomalies",
            self.schedules.unique_schedules().len(),
            zone_loads.len(),
            setpoint_links.len(),
            self.zone_loads.field_anomalies()
        );

        ExtractionOutput {
            settings: self.settings.into_table(),
            schedules: self.schedules.unique_schedules(),
            zone_loads,
            setpoint_links,
            zone_schedules: self.zone_schedules.into_schedules_by_zone(),
            thermostat_zones: self.thermostat_zones.into_unique_zone_ids(),
        }
    }
}

/// Read `path` once and return every extractor's result
///
/// Fails on [`crate::Error::SourceNotFound`] before reading and on
/// [`crate::Error::StreamRead`] part-way; use [`ExtractionPipeline`] directly
/// to keep the partial results of a failed pass.
pub fn extract_file(path: impl AsRef<Path>, config: &ExtractorConfig) -> Result<ExtractionOutput> {
    let mut pipeline = ExtractionPipeline::new(config.clone());
    let mut reader = pipeline.open_reader(path)?;
    pipeline.consume(&mut reader)?;
    Ok(pipeline.into_output())
}
