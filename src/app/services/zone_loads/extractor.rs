//! Zone load-data extractor
//!
//! Builds one [`ZoneLoadRecord`] per zone from the load objects inside that
//! zone's block, and collects the dual-setpoint thermostat objects wherever
//! they appear. Air-change rates are derived when the data is read out.

use indexmap::IndexMap;
use tracing::debug;

use super::decoders::{
    DualSetpointFields, InfiltrationFields, LoadObject, OtherEquipmentFields, VentilationFields,
};
use super::heuristics::is_non_fixed_equipment;
use crate::app::models::{ObjectRecord, Record, SetpointLink, ZoneId, ZoneLoadRecord};
use crate::app::services::pipeline::RecordSink;
use crate::config::ExtractorConfig;
use crate::constants::SECONDS_PER_HOUR;

/// Air changes per hour from the captured terms
///
/// A directly specified rate is used as-is. Otherwise the design flow rate
/// (m3/s) is converted when the volume is known and positive. The per-area,
/// per-exterior-area and per-person flow terms do not contribute.
pub fn derive_air_changes(
    direct_ach: Option<f64>,
    design_flow_rate: Option<f64>,
    volume: Option<f64>,
) -> Option<f64> {
    if direct_ach.is_some() {
        return direct_ach;
    }
    match (design_flow_rate, volume) {
        (Some(flow), Some(volume)) if volume > 0.0 => Some(flow * SECONDS_PER_HOUR / volume),
        _ => None,
    }
}

/// Fill each zone's setpoint schedules from the thermostat it references
///
/// Zones whose thermostat object name has no link keep `None`.
pub fn apply_setpoint_links(
    zones: &mut IndexMap<ZoneId, ZoneLoadRecord>,
    links: &IndexMap<String, SetpointLink>,
) {
    for (zone_id, record) in zones.iter_mut() {
        let Some(link) = record
            .thermostat_setpoint_object_name
            .as_ref()
            .and_then(|name| links.get(name))
        else {
            continue;
        };

        debug!("Linking setpoint schedules to zone {}", zone_id);
        record.heating_setpoint_schedule = link.heating_schedule.clone();
        record.cooling_setpoint_schedule = link.cooling_schedule.clone();
    }
}

/// Per-zone load parameters for one pass
#[derive(Debug, Clone)]
pub struct ZoneLoadExtractor {
    non_fixed_markers: Vec<String>,
    zones: IndexMap<ZoneId, ZoneLoadRecord>,
    setpoint_links: IndexMap<String, SetpointLink>,
    field_anomalies: usize,
}

impl ZoneLoadExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            non_fixed_markers: config.non_fixed_equipment_markers.clone(),
            zones: IndexMap::new(),
            setpoint_links: IndexMap::new(),
            field_anomalies: 0,
        }
    }

    /// Zone records with air-change rates derived
    pub fn zone_load_data(&self) -> IndexMap<ZoneId, ZoneLoadRecord> {
        let mut zones = self.zones.clone();
        zones.values_mut().for_each(finalize_air_changes);
        zones
    }

    /// Thermostat object name to setpoint schedules
    pub fn setpoint_links(&self) -> &IndexMap<String, SetpointLink> {
        &self.setpoint_links
    }

    /// Numeric fields that were present but could not be parsed
    pub fn field_anomalies(&self) -> usize {
        self.field_anomalies
    }

    fn process_object(&mut self, object: &ObjectRecord) {
        let decoded = LoadObject::decode(object);

        if let Some(LoadObject::DualSetpoint(setpoint)) = decoded {
            self.store_setpoint_link(setpoint);
            return;
        }

        let Some(zone_id) = object.zone.as_deref() else {
            return;
        };

        let record = self
            .zones
            .entry(zone_id.to_string())
            .or_insert_with(|| ZoneLoadRecord::new(zone_id));

        let Some(decoded) = decoded else {
            return;
        };

        let invalid = decoded.invalid_numbers();
        if !invalid.is_empty() {
            debug!(
                "{} in zone {}: non-numeric values {:?} treated as missing",
                object.keyword, zone_id, invalid
            );
            self.field_anomalies += invalid.len();
        }

        match decoded {
            LoadObject::Zone(zone) => {
                record.zone_floor_area = zone.floor_area.number();
                record.zone_volume = zone.volume.number();
            }
            LoadObject::People(people) => {
                record.occupancy_schedule = people.schedule;
                record.occupancy_people_per_area = people.people_per_area.number();
                record.occupancy_activity_schedule = people.activity_schedule;
                record.occupancy_clothing_schedule = people.clothing_schedule;
                record.occupancy_air_velocity_schedule = people.air_velocity_schedule;
            }
            LoadObject::Lights(lights) => {
                record.lighting_schedule = lights.schedule;
                record.lighting_watts_per_area = lights.watts_per_area.number();
            }
            LoadObject::OtherEquipment(equipment) => {
                apply_equipment(record, equipment, &self.non_fixed_markers);
            }
            LoadObject::ThermostatControl(control) => {
                if let Some(name) = control.control_object_name {
                    record.thermostat_setpoint_object_name = Some(name);
                }
            }
            LoadObject::Infiltration(infiltration) => apply_infiltration(record, infiltration),
            LoadObject::Ventilation(ventilation) => apply_ventilation(record, ventilation),
            LoadObject::DualSetpoint(_) => {}
        }
    }

    fn store_setpoint_link(&mut self, setpoint: DualSetpointFields) {
        let Some(name) = setpoint.name else {
            return;
        };
        debug!("Setpoint link for thermostat {}", name);
        self.setpoint_links.insert(
            name,
            SetpointLink {
                heating_schedule: setpoint.heating_schedule,
                cooling_schedule: setpoint.cooling_schedule,
            },
        );
    }
}

fn apply_equipment(record: &mut ZoneLoadRecord, equipment: OtherEquipmentFields, markers: &[String]) {
    let name = equipment.name.as_deref().unwrap_or_default();
    let watts = equipment.watts_per_area.number();

    let (watts_slot, schedule_slot) =
        if is_non_fixed_equipment(name, equipment.schedule.as_deref(), markers) {
            (
                &mut record.non_fixed_equip_watts_per_area,
                &mut record.non_fixed_equip_schedule,
            )
        } else {
            (
                &mut record.fixed_equip_watts_per_area,
                &mut record.fixed_equip_schedule,
            )
        };

    if watts.is_some() {
        *watts_slot = watts;
    }
    if equipment.schedule.is_some() {
        *schedule_slot = equipment.schedule;
    }
}

fn apply_infiltration(record: &mut ZoneLoadRecord, infiltration: InfiltrationFields) {
    record.infiltration_schedule = infiltration.schedule;
    let design = &mut record.infiltration_design;
    design.design_flow_rate = infiltration.design_flow_rate.number();
    design.flow_per_zone_floor_area = infiltration.flow_per_zone_floor_area.number();
    design.flow_per_exterior_surface_area = infiltration.flow_per_exterior_surface_area.number();
    design.air_changes_per_hour = infiltration.air_changes_per_hour.number();
}

fn apply_ventilation(record: &mut ZoneLoadRecord, ventilation: VentilationFields) {
    record.ventilation_schedule = ventilation.schedule;
    let design = &mut record.ventilation_design;
    design.design_flow_rate = ventilation.design_flow_rate.number();
    design.flow_per_zone_floor_area = ventilation.flow_per_zone_floor_area.number();
    design.flow_per_person = ventilation.flow_per_person.number();
    design.air_changes_per_hour = ventilation.air_changes_per_hour.number();
}

fn finalize_air_changes(record: &mut ZoneLoadRecord) {
    record.infiltration_ach = derive_air_changes(
        record.infiltration_design.air_changes_per_hour,
        record.infiltration_design.design_flow_rate,
        record.zone_volume,
    );
    record.ventilation_ach = derive_air_changes(
        record.ventilation_design.air_changes_per_hour,
        record.ventilation_design.design_flow_rate,
        record.zone_volume,
    );
}

impl RecordSink for ZoneLoadExtractor {
    fn process(&mut self, record: &Record) {
        if let Record::Object(object) = record {
            self.process_object(object);
        }
    }

    fn name(&self) -> &'static str {
        "zone loads"
    }
}
