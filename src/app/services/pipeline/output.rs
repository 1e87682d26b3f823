//! Extraction results handed to report generators

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::app::models::{ScheduleDefinition, SetpointLink, SettingsTable, ZoneId, ZoneLoadRecord};

/// Everything extracted from one model file
///
/// Plain owned data; nothing here refers back to reader or extractor state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub settings: SettingsTable,
    pub schedules: Vec<ScheduleDefinition>,
    /// Zone records with air-change rates derived and setpoint schedules joined
    pub zone_loads: IndexMap<ZoneId, ZoneLoadRecord>,
    pub setpoint_links: IndexMap<String, SetpointLink>,
    pub zone_schedules: BTreeMap<ZoneId, BTreeSet<String>>,
    pub thermostat_zones: BTreeSet<ZoneId>,
}

impl ExtractionOutput {
    /// Zones known to any extractor, sorted
    pub fn zone_ids(&self) -> BTreeSet<&str> {
        self.zone_loads
            .keys()
            .chain(self.zone_schedules.keys())
            .chain(self.thermostat_zones.iter())
            .map(String::as_str)
            .collect()
    }

    /// Whether the settings table has at least one key set
    pub fn has_settings(&self) -> bool {
        self.settings
            .values()
            .flat_map(|settings| settings.values())
            .any(|value| value != crate::constants::NOT_FOUND)
    }
}
