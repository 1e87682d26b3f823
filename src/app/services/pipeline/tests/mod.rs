//! Test fixtures for the extraction pipeline

use std::io::Write;
use tempfile::NamedTempFile;


/// A small but complete model: settings, two zones, loads, schedules and a
/// dual-setpoint thermostat declared after the zones
pub const SAMPLE_IDF: &str = r#"! Geometry convention template: ASHRAE 90.1
! Zone volume calculation method: Auto

Version,9.6;

Timestep,4;

Site:Location,
    Chicago Ohare Intl Ap,   !- Name
    41.98,                   !- Latitude {deg}
    -87.92,                  !- Longitude {deg}
    -6.00,                   !- Time Zone {hr}
    201.00;                  !- Elevation {m}

Schedule:Compact,
    Office Occupancy Schedule,  !- Name
    Fraction,                !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 08:00, 0.1,       !- Field 3
    Until: 18:00, 0.9,       !- Field 5
    Until: 24:00, 0.1;       !- Field 7

Schedule:Compact,
    Lab Occupancy Schedule,  !- Name
    Fraction,                !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 08:00, 0.1,       !- Field 3
    Until: 18:00, 0.9,       !- Field 5
    Until: 24:00, 0.1;       !- Field 7

Schedule:Compact,
    Office Heating SP Schedule,  !- Name
    Temperature,             !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 24:00, 21;        !- Field 3

Zone,
    Office,                  !- Name
    0,                       !- Direction of Relative North {deg}
    0,                       !- X Origin {m}
    0,                       !- Y Origin {m}
    0,                       !- Z Origin {m}
    1,                       !- Type
    100.0,                   !- Floor Area {m2}
    250.0;                   !- Volume {m3}

People,
    Office People,           !- Name
    Office,                  !- Zone or ZoneList Name
    Office Occupancy Schedule,  !- Number of People Schedule Name
    People/Area,             !- Number of People Calculation Method
    0.1,                     !- Zone Floor Area per Person (dummy)
    0.05;                    !- People per Zone Floor Area {person/m2}

Lights,
    Office Lights,           !- Name
    Office,                  !- Zone or ZoneList Name
    Office Lighting Schedule,  !- Schedule Name
    Watts/Area,              !- Design Level Calculation Method
    0,                       !- Lighting Level {W}
    10.0;                    !- Watts per Zone Floor Area {W/m2}

ZoneInfiltration:DesignFlowRate,
    Office Infiltration,     !- Name
    Office,                  !- Zone or ZoneList Name
    Infiltration Schedule,   !- Schedule Name
    0.05,                    !- Design Flow Rate {m3/s}
    ,                        !- Flow per Zone Floor Area {m3/s-m2}
    ,                        !- Flow per Exterior Surface Area {m3/s-m2}
    ;                        !- Air Changes per Hour {1/hr}

ZoneControl:Thermostat,
    Office Thermostat,       !- Name
    Office,                  !- Zone or ZoneList Name
    Control Type Schedule,   !- Control Type Schedule Name
    ThermostatSetpoint:DualSetpoint,  !- Control 1 Object Type
    Office Dual SP;          !- Control 1 Name

Zone,Lab,0,0,0,0,1,50.0,150.0;

Lights,Lab Lights,Lab,Lab Lighting Schedule,Watts/Area,0,8.0;

ThermostatSetpoint:DualSetpoint,
    Office Dual SP,          !- Name
    Office Heating SP Schedule,  !- Heating Setpoint Temperature Schedule Name
    Office Cooling SP Schedule;  !- Cooling Setpoint Temperature Schedule Name
"#;

/// Write content to a temporary `.idf` file
pub fn write_temp_idf(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".idf").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
