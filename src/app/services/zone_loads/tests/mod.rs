//! Test utilities for zone load extraction

use crate::app::models::{ObjectRecord, Record};
use crate::app::services::pipeline::RecordSink;
use crate::app::services::zone_loads::ZoneLoadExtractor;
use crate::config::ExtractorConfig;

mod extractor_tests;
mod heuristics_tests;

/// Build an object record in the given zone context
pub fn object_in(zone: Option<&str>, keyword: &str, fields: &[&str]) -> Record {
    Record::Object(ObjectRecord {
        keyword: keyword.to_string(),
        fields: fields.iter().map(|field| field.to_string()).collect(),
        zone: zone.map(str::to_string),
    })
}

/// Feed records to a fresh extractor with default configuration
pub fn extract(records: &[Record]) -> ZoneLoadExtractor {
    let mut extractor = ZoneLoadExtractor::new(&ExtractorConfig::default());
    for record in records {
        extractor.process(record);
    }
    extractor
}

/// Fields of a `Zone` object with the given floor area and volume
pub fn zone_fields(name: &'static str, floor_area: &'static str, volume: &'static str) -> Vec<&'static str> {
    vec![name, "0", "0", "0", "0", "1", floor_area, volume]
}
