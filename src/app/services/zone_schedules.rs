//! Zone association extractors
//!
//! [`ZoneScheduleExtractor`] maps each zone to the schedule names referenced
//! inside its block. [`ThermostatZoneExtractor`] collects the zones named by
//! thermostat control objects, independently of zone context.

use std::collections::{BTreeMap, BTreeSet};

use crate::app::models::{Record, ZoneId};
use crate::app::services::pipeline::RecordSink;
use crate::app::services::zone_loads::heuristics::references_schedule;
use crate::constants::{THERMOSTAT_SUFFIX, keywords};

/// Schedule names referenced per zone
#[derive(Debug, Clone, Default)]
pub struct ZoneScheduleExtractor {
    schedules_by_zone: BTreeMap<ZoneId, BTreeSet<String>>,
}

impl ZoneScheduleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zone to the set of field values that look like schedule names
    ///
    /// Every zone that had at least one object appears, possibly with an
    /// empty set.
    pub fn schedules_by_zone(&self) -> &BTreeMap<ZoneId, BTreeSet<String>> {
        &self.schedules_by_zone
    }

    pub fn into_schedules_by_zone(self) -> BTreeMap<ZoneId, BTreeSet<String>> {
        self.schedules_by_zone
    }
}

impl RecordSink for ZoneScheduleExtractor {
    fn process(&mut self, record: &Record) {
        let Record::Object(object) = record else {
            return;
        };
        let Some(zone) = object.zone.as_ref() else {
            return;
        };

        let schedules = self.schedules_by_zone.entry(zone.clone()).or_default();
        schedules.extend(
            object
                .fields
                .iter()
                .filter(|field| !field.is_empty() && references_schedule(field))
                .cloned(),
        );
    }

    fn name(&self) -> &'static str {
        "zone schedules"
    }
}

/// Unique zones referenced by `ZoneControl:Thermostat` objects
#[derive(Debug, Clone, Default)]
pub struct ThermostatZoneExtractor {
    zone_ids: BTreeSet<ZoneId>,
}

impl ThermostatZoneExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique_zone_ids(&self) -> &BTreeSet<ZoneId> {
        &self.zone_ids
    }

    pub fn into_unique_zone_ids(self) -> BTreeSet<ZoneId> {
        self.zone_ids
    }
}

impl RecordSink for ThermostatZoneExtractor {
    fn process(&mut self, record: &Record) {
        let Some(object) = record.as_object() else {
            return;
        };
        if !object.is(keywords::ZONE_CONTROL_THERMOSTAT) {
            return;
        }

        let Some(zone_reference) = object.field(1) else {
            return;
        };
        let zone_id = zone_reference.replace(THERMOSTAT_SUFFIX, "");
        let zone_id = zone_id.trim();
        if !zone_id.is_empty() {
            self.zone_ids.insert(zone_id.to_string());
        }
    }

    fn name(&self) -> &'static str {
        "thermostat zones"
    }
}
