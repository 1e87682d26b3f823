//! Test utilities for the stream reader
//!
//! Helpers for building readers over in-memory content and temporary files.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

use super::IdfReader;
use crate::app::models::{ObjectRecord, Record};


/// Settings-comment keys used across reader tests
pub fn geometry_keys() -> HashSet<String> {
    [
        "Geometry convention template",
        "Zone volume calculation method",
    ]
    .iter()
    .map(|key| key.to_string())
    .collect()
}

/// Reader over in-memory content with the default marker
pub fn reader_for(content: &str) -> IdfReader<Cursor<Vec<u8>>> {
    IdfReader::from_reader(
        Cursor::new(content.as_bytes().to_vec()),
        "memory.idf",
        geometry_keys(),
        '!',
    )
}

/// Read every record, panicking on a stream error
pub fn read_all(content: &str) -> Vec<Record> {
    reader_for(content)
        .collect::<crate::Result<Vec<_>>>()
        .unwrap()
}

/// Object records only
pub fn objects(content: &str) -> Vec<ObjectRecord> {
    read_all(content)
        .into_iter()
        .filter_map(|record| match record {
            Record::Object(object) => Some(object),
            Record::Comment(_) => None,
        })
        .collect()
}

/// Write content to a temporary `.idf` file
pub fn write_temp_idf(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".idf").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
