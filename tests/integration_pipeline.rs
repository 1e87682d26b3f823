//! End-to-end tests over model files written to disk
//!
//! Each test writes a small but realistic IDF model to a temporary file and
//! runs it through the public library surface or the CLI command helpers.

use idf_extract::app::services::idf_reader::IdfReader;
use idf_extract::app::services::schedule_extractor::{
    date_range_labels, expand_time_value_pairs, parse_compact_rules,
};
use idf_extract::cli::args::{OutputFormat, Section};
use idf_extract::cli::commands::{extract_one, render_extractions, resolve_inputs, validate_one};
use idf_extract::{Error, ExtractorConfig, Record, extract_file};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A seasonal office model written the way design tools export it
const OFFICE_MODEL: &str = r#"!-Generator IDFEditor 1.51
! Geometry convention template: ASHRAE 90.1
! Zone geometry and surface areas: Taken from drawings
! Window to wall ratio method: Per facade

Version,
    9.6;                     !- Version Identifier

Timestep,6;

SimulationControl,
    Yes,                     !- Do Zone Sizing Calculation
    Yes,                     !- Do System Sizing Calculation
    No,                      !- Do Plant Sizing Calculation
    No,                      !- Run Simulation for Sizing Periods
    Yes;                     !- Run Simulation for Weather File Run Periods

Site:GroundTemperature:BuildingSurface,
    18.0, 18.0, 18.5, 19.0, 19.5, 20.0,
    20.5, 20.5, 20.0, 19.5, 19.0, 18.5;

Schedule:Compact,
    Office Occupancy,        !- Name
    Fraction,                !- Schedule Type Limits Name
    Through: 31 Mar,         !- Field 1
    For: Weekdays,           !- Field 2
    Until: 08:00, 0,         !- Field 3
    Until: 18:00, 1,         !- Field 5
    Until: 24:00, 0,         !- Field 7
    For: AllOtherDays,       !- Field 9
    Until: 24:00, 0,         !- Field 10
    Through: 31 Dec,         !- Field 12
    For: AllDays,            !- Field 13
    Until: 09:00, 0,         !- Field 14
    Until: 17:00, 0.75,      !- Field 16
    Until: 24:00, 0;         !- Field 18

Schedule:Compact,
    Office Cooling Setpoint, !- Name
    Temperature,             !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 24:00, 24;        !- Field 3

Zone,
    Open Office,             !- Name
    0,                       !- Direction of Relative North {deg}
    0,                       !- X Origin {m}
    0,                       !- Y Origin {m}
    0,                       !- Z Origin {m}
    1,                       !- Type
    200.0,                   !- Floor Area {m2}
    600.0;                   !- Volume {m3}

OtherEquipment,
    Open Office Miscellaneous Loads,  !- Name
    None,                    !- Fuel Type
    Open Office,             !- Zone or ZoneList Name
    Equipment Schedule,      !- Schedule Name
    Watts/Area,              !- Design Level Calculation Method
    0,                       !- Design Level {W}
    5.0;                     !- Power per Zone Floor Area {W/m2}

OtherEquipment,
    Open Office Servers,     !- Name
    None,                    !- Fuel Type
    Open Office,             !- Zone or ZoneList Name
    Always On Schedule,      !- Schedule Name
    Watts/Area,              !- Design Level Calculation Method
    0,                       !- Design Level {W}
    12.0;                    !- Power per Zone Floor Area {W/m2}

ZoneVentilation:DesignFlowRate,
    Open Office Ventilation, !- Name
    Open Office,             !- Zone or ZoneList Name
    Ventilation Schedule,    !- Schedule Name
    0.2;                     !- Design Flow Rate {m3/s}

Zone,Meeting Room,0,0,0,0,1,30.0,90.0;

People,Meeting People,Meeting Room,Office Occupancy,People/Area,0.5,0.25;Meeting Visitors,Meeting Room,Office Occupancy,People/Area,0.5,0.1;

ZoneInfiltration:DesignFlowRate,
    Meeting Infiltration,    !- Name
    Meeting Room,            !- Zone or ZoneList Name
    Infiltration Schedule,   !- Schedule Name
    0.02,                    !- Design Flow Rate {m3/s}
    0,                       !- Flow per Zone Floor Area {m3/s-m2}
    0,                       !- Flow per Exterior Surface Area {m3/s-m2}
    0.5;                     !- Air Changes per Hour {1/hr}
"#;

fn write_model(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn office_model(dir: &TempDir) -> PathBuf {
    write_model(dir, "office.idf", OFFICE_MODEL)
}

#[test]
fn test_office_model_settings() {
    let dir = TempDir::new().unwrap();
    let output = extract_file(office_model(&dir), &ExtractorConfig::default()).unwrap();

    let general = &output.settings["General Settings"];
    assert_eq!(general["Version"], "EnergyPlus Version 9.6");
    assert_eq!(general["Timestep"], "6 timesteps per hour");
    assert_ne!(general["SimulationControl"], "Not Found");

    let geometry = &output.settings["Geometry Settings"];
    assert_eq!(geometry["Geometry convention template"], "ASHRAE 90.1");
    assert_eq!(geometry["Window to wall ratio method"], "Per facade");
    assert_eq!(geometry["Zone volume calculation method"], "Not Found");

    let ground = &output.settings["Ground Temperature Settings"];
    let grid = &ground["Site:GroundTemperature:BuildingSurface"];
    assert!(grid.contains("Jan"));
    assert!(grid.contains("Dec"));
    assert!(grid.contains("20.50"));
}

#[test]
fn test_office_model_schedules_and_rule_blocks() {
    let dir = TempDir::new().unwrap();
    let output = extract_file(office_model(&dir), &ExtractorConfig::default()).unwrap();

    // The cooling setpoint schedule is excluded by name
    assert_eq!(output.schedules.len(), 1);
    let occupancy = &output.schedules[0];
    assert_eq!(occupancy.name, "Office Occupancy");

    let blocks = parse_compact_rules(&occupancy.raw_rules, 60);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].day_blocks.len(), 2);
    assert_eq!(blocks[0].day_blocks[0].day_types, vec!["Weekdays"]);
    assert_eq!(blocks[0].day_blocks[0].values[8], "1");
    assert_eq!(blocks[1].day_blocks[0].values[9], "0.75");
    assert_eq!(
        date_range_labels(&blocks),
        vec!["01/01 -> 31/03", "31/03 -> 31/12"]
    );
}

#[test]
fn test_office_model_zone_loads() {
    let dir = TempDir::new().unwrap();
    let output = extract_file(office_model(&dir), &ExtractorConfig::default()).unwrap();

    let office = &output.zone_loads["Open Office"];
    assert_eq!(office.zone_floor_area, Some(200.0));
    assert_eq!(office.non_fixed_equip_watts_per_area, Some(5.0));
    assert_eq!(office.non_fixed_equip_schedule.as_deref(), Some("Equipment Schedule"));
    assert_eq!(office.fixed_equip_watts_per_area, Some(12.0));
    assert_eq!(office.fixed_equip_schedule.as_deref(), Some("Always On Schedule"));
    let ventilation_ach = office.ventilation_ach.unwrap();
    assert!((ventilation_ach - 1.2).abs() < 1e-9);

    // The fused People line splits into two objects; the later one wins
    let meeting = &output.zone_loads["Meeting Room"];
    assert_eq!(meeting.occupancy_people_per_area, Some(0.1));
    assert_eq!(meeting.occupancy_schedule.as_deref(), Some("Office Occupancy"));
    assert_eq!(meeting.infiltration_ach, Some(0.5));
    assert_eq!(meeting.heating_setpoint_schedule, None);
}

#[test]
fn test_reader_reports_fused_objects_and_zones() {
    let dir = TempDir::new().unwrap();
    let config = ExtractorConfig::default();
    let mut reader = IdfReader::open(
        office_model(&dir),
        config.settings.comment_keys(),
        config.comment_marker,
    )
    .unwrap();

    let records: Vec<Record> = reader.by_ref().collect::<Result<_, _>>().unwrap();
    let people_zones: Vec<Option<&str>> = records
        .iter()
        .filter_map(Record::as_object)
        .filter(|object| object.is("People"))
        .map(|object| object.zone.as_deref())
        .collect();

    assert_eq!(people_zones, vec![Some("Meeting Room"), Some("Meeting Room")]);
    assert_eq!(reader.stats().fused_objects, 1);
    assert_eq!(reader.stats().zones, 2);
    assert_eq!(reader.stats().settings_comments, 3);
}

#[test]
fn test_hourly_expansion_of_extracted_pairs() {
    let dir = TempDir::new().unwrap();
    let output = extract_file(office_model(&dir), &ExtractorConfig::default()).unwrap();
    let blocks = parse_compact_rules(&output.schedules[0].raw_rules, 60);

    let pairs = &blocks[1].day_blocks[0].pairs;
    let values = expand_time_value_pairs(pairs);
    assert_eq!(values.len(), 24);
    assert!(values[..9].iter().all(|v| v == "0"));
    assert!(values[9..17].iter().all(|v| v == "0.75"));
    assert!(values[17..].iter().all(|v| v == "0"));
}

#[test]
fn test_missing_model_is_source_not_found() {
    let dir = TempDir::new().unwrap();
    let result = extract_file(dir.path().join("absent.idf"), &ExtractorConfig::default());
    match result {
        Err(error @ Error::SourceNotFound { .. }) => assert!(error.is_source_failure()),
        other => panic!("expected SourceNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_directory_run_renders_json_per_file() {
    let dir = TempDir::new().unwrap();
    office_model(&dir);
    write_model(&dir, "small.idf", "Zone,Lab,0,0,0,0,1,10.0,30.0;\n");

    let files = resolve_inputs(&[dir.path().to_string_lossy().to_string()]).unwrap();
    assert_eq!(files.len(), 2);

    let config = ExtractorConfig::default();
    let extractions: Vec<_> = files.iter().map(|f| extract_one(f, &config)).collect();
    assert!(extractions.iter().all(|e| e.complete));

    let json = render_extractions(
        &extractions,
        &[Section::Thermostats, Section::ZoneLoads],
        OutputFormat::Json,
        60,
    )
    .unwrap();
    let documents: serde_json::Value = serde_json::from_str(&json).unwrap();
    let documents = documents.as_array().unwrap();
    assert_eq!(documents.len(), 2);
    assert!(documents.iter().all(|d| d.get("schedules").is_none()));

    let sources: Vec<&str> = documents
        .iter()
        .map(|d| d["source"].as_str().unwrap())
        .collect();
    assert!(sources[0].ends_with("office.idf"));
    assert!(Path::new(sources[1]).ends_with("small.idf"));
    assert_eq!(documents[1]["zone_loads"]["Lab"]["zone_volume"], 30.0);
}

#[test]
fn test_validate_reports_unterminated_object() {
    let dir = TempDir::new().unwrap();
    let path = write_model(&dir, "broken.idf", "Version,9.6;\nZone,\n    Lab,\n    0,\n");

    let validation = validate_one(&path, &ExtractorConfig::default());
    assert!(validation.error.is_none());
    assert!(validation.stats.unterminated_at_eof);
    assert_eq!(validation.stats.objects, 1);
}
