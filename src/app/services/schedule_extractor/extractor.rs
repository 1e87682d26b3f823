//! Schedule extractor
//!
//! Collects unique schedule definitions. Uniqueness is by `(type, rules)`:
//! two schedules with the same type and identical rule fields collapse to the
//! first one seen, whatever their names.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;

use crate::app::models::{ObjectRecord, Record, ScheduleDefinition};
use crate::app::services::pipeline::RecordSink;
use crate::app::services::zone_loads::heuristics::is_setpoint_schedule_name;
use crate::config::ExtractorConfig;

/// Unique schedules grouped by type, in first-seen order
#[derive(Debug, Clone)]
pub struct ScheduleExtractor {
    schedule_keyword: String,
    setpoint_indicators: Vec<String>,
    schedules_by_type: IndexMap<String, IndexMap<Vec<String>, ScheduleDefinition>>,
    setpoint_skipped: usize,
    duplicates_skipped: usize,
}

impl ScheduleExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            schedule_keyword: config.schedule_keyword.clone(),
            setpoint_indicators: config.setpoint_indicators.clone(),
            schedules_by_type: IndexMap::new(),
            setpoint_skipped: 0,
            duplicates_skipped: 0,
        }
    }

    /// All retained schedules: type buckets in first-seen order, then
    /// insertion order within each bucket
    pub fn unique_schedules(&self) -> Vec<ScheduleDefinition> {
        self.schedules_by_type
            .values()
            .flat_map(|bucket| bucket.values().cloned())
            .collect()
    }

    /// Number of schedules discarded for a setpoint-like name
    pub fn setpoint_skipped(&self) -> usize {
        self.setpoint_skipped
    }

    /// Number of schedules discarded as duplicates of an earlier one
    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }

    fn process_schedule(&mut self, object: &ObjectRecord) {
        let [name, schedule_type, rules @ ..] = object.fields.as_slice() else {
            debug!("Schedule object with fewer than two fields ignored");
            return;
        };

        if is_setpoint_schedule_name(name, &self.setpoint_indicators) {
            debug!("Skipping setpoint schedule: {}", name);
            self.setpoint_skipped += 1;
            return;
        }

        let bucket = self
            .schedules_by_type
            .entry(schedule_type.clone())
            .or_default();

        match bucket.entry(rules.to_vec()) {
            Entry::Occupied(existing) => {
                debug!(
                    "Schedule {} duplicates {}, skipping",
                    name,
                    existing.get().name
                );
                self.duplicates_skipped += 1;
            }
            Entry::Vacant(slot) => {
                slot.insert(ScheduleDefinition {
                    name: name.clone(),
                    schedule_type: schedule_type.clone(),
                    raw_rules: rules.to_vec(),
                });
            }
        }
    }
}

impl RecordSink for ScheduleExtractor {
    fn process(&mut self, record: &Record) {
        if let Record::Object(object) = record {
            if object.is(&self.schedule_keyword) {
                self.process_schedule(object);
            }
        }
    }

    fn name(&self) -> &'static str {
        "schedules"
    }
}
