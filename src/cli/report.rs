//! Human-readable rendering of extraction results
//!
//! Everything here returns a `String`; the command layer decides where it
//! goes. Colors come from `colored` and are dropped automatically when the
//! output is not a terminal or `NO_COLOR` is set.

use std::fmt::Write;
use std::path::Path;

use colored::Colorize;

use crate::app::models::{ScheduleDefinition, ZoneLoadRecord};
use crate::app::services::idf_reader::ReaderStats;
use crate::app::services::pipeline::ExtractionOutput;
use crate::app::services::schedule_extractor::{date_range_labels, parse_compact_rules};
use crate::cli::args::Section;
use crate::constants::{MINUTES_PER_HOUR, NOT_FOUND};

/// Render the selected sections of one file's extraction
pub fn render_extraction(
    source: &Path,
    output: &ExtractionOutput,
    sections: &[Section],
    slot_minutes: u32,
) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", source.display().to_string().bold().underline());

    for section in sections {
        text.push('\n');
        match section {
            Section::Settings => render_settings(&mut text, output),
            Section::Schedules => render_schedules(&mut text, &output.schedules, slot_minutes),
            Section::ZoneLoads => render_zone_loads(&mut text, output),
            Section::ZoneSchedules => render_zone_schedules(&mut text, output),
            Section::Thermostats => render_thermostats(&mut text, output),
        }
    }
    text
}

fn heading(text: &mut String, title: &str) {
    let _ = writeln!(text, "{}", title.cyan().bold());
}

fn render_settings(text: &mut String, output: &ExtractionOutput) {
    heading(text, "Settings");
    for (category, settings) in &output.settings {
        let _ = writeln!(text, "  {}", category.bold());
        for (key, value) in settings {
            let mut lines = value.lines();
            let first = lines.next().unwrap_or_default();
            let first = if value == NOT_FOUND {
                first.dimmed().to_string()
            } else {
                first.to_string()
            };
            let _ = writeln!(text, "    {:<36} {}", key, first);
            for line in lines {
                let _ = writeln!(text, "    {:<36} {}", "", line);
            }
        }
    }
}

fn render_schedules(text: &mut String, schedules: &[ScheduleDefinition], slot_minutes: u32) {
    heading(text, &format!("Schedules ({})", schedules.len()));
    for schedule in schedules {
        let _ = writeln!(
            text,
            "  {} [{}]",
            schedule.name.bold(),
            schedule.schedule_type
        );

        let blocks = parse_compact_rules(&schedule.raw_rules, slot_minutes);
        let labels = date_range_labels(&blocks);
        let mut ordered: Vec<_> = blocks.iter().collect();
        ordered.sort_by_key(|block| block.through);

        for (label, block) in labels.iter().zip(ordered) {
            let _ = writeln!(text, "    {}", label.yellow());
            for day_block in &block.day_blocks {
                let _ = writeln!(
                    text,
                    "      {:<28} {}",
                    day_block.day_types.join(" "),
                    day_block.values.join(" ")
                );
            }
        }
    }
}

fn render_zone_loads(text: &mut String, output: &ExtractionOutput) {
    heading(text, &format!("Zone loads ({})", output.zone_loads.len()));
    for (zone_id, record) in &output.zone_loads {
        let _ = writeln!(text, "  {}", zone_id.bold());
        for (label, value) in zone_load_rows(record) {
            let _ = writeln!(text, "    {:<32} {}", label, value);
        }
    }
}

fn zone_load_rows(record: &ZoneLoadRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Floor area [m2]", number(record.zone_floor_area)),
        ("Volume [m3]", number(record.zone_volume)),
        ("People per area [1/m2]", number(record.occupancy_people_per_area)),
        ("Occupancy schedule", name(&record.occupancy_schedule)),
        ("Activity schedule", name(&record.occupancy_activity_schedule)),
        ("Lighting [W/m2]", number(record.lighting_watts_per_area)),
        ("Lighting schedule", name(&record.lighting_schedule)),
        ("Fixed equipment [W/m2]", number(record.fixed_equip_watts_per_area)),
        ("Fixed equipment schedule", name(&record.fixed_equip_schedule)),
        (
            "Non-fixed equipment [W/m2]",
            number(record.non_fixed_equip_watts_per_area),
        ),
        ("Non-fixed equipment schedule", name(&record.non_fixed_equip_schedule)),
        ("Heating setpoint schedule", name(&record.heating_setpoint_schedule)),
        ("Cooling setpoint schedule", name(&record.cooling_setpoint_schedule)),
        (
            "Heating availability",
            record.heating_availability_schedule.clone(),
        ),
        (
            "Cooling availability",
            record.cooling_availability_schedule.clone(),
        ),
        ("Infiltration [ACH]", number(record.infiltration_ach)),
        ("Infiltration schedule", name(&record.infiltration_schedule)),
        ("Ventilation [ACH]", number(record.ventilation_ach)),
        ("Ventilation schedule", name(&record.ventilation_schedule)),
    ]
}

fn number(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.3}", value),
        None => "-".dimmed().to_string(),
    }
}

fn name(value: &Option<String>) -> String {
    match value {
        Some(value) => value.clone(),
        None => "-".dimmed().to_string(),
    }
}

fn render_zone_schedules(text: &mut String, output: &ExtractionOutput) {
    heading(text, "Zone schedules");
    for (zone_id, schedules) in &output.zone_schedules {
        let _ = writeln!(text, "  {}", zone_id.bold());
        if schedules.is_empty() {
            let _ = writeln!(text, "    {}", "(none)".dimmed());
        }
        for schedule in schedules {
            let _ = writeln!(text, "    {}", schedule);
        }
    }
}

fn render_thermostats(text: &mut String, output: &ExtractionOutput) {
    heading(
        text,
        &format!("Thermostat zones ({})", output.thermostat_zones.len()),
    );
    for zone_id in &output.thermostat_zones {
        let _ = writeln!(text, "  {}", zone_id);
    }
}

/// Render an expanded day vector, one slot per line
pub fn render_expansion(values: &[String], slot_minutes: u32) -> String {
    let mut text = String::new();
    for (index, value) in values.iter().enumerate() {
        let start = index as u32 * slot_minutes;
        let end = start + slot_minutes;
        let _ = writeln!(
            text,
            "{} - {}  {}",
            clock(start).dimmed(),
            clock(end).dimmed(),
            value
        );
    }
    text
}

fn clock(minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

/// Render reader statistics for one file
pub fn render_validation(source: &Path, stats: &ReaderStats, error: Option<&str>) -> String {
    let mut text = String::new();
    let status = match error {
        None => "OK".green().bold(),
        Some(_) => "FAILED".red().bold(),
    };
    let _ = writeln!(text, "{} {}", status, source.display());
    let _ = writeln!(text, "  {}", stats.summary());
    if stats.unterminated_at_eof {
        let _ = writeln!(
            text,
            "  {}",
            "object still open at end of file was discarded".yellow()
        );
    }
    if let Some(error) = error {
        let _ = writeln!(text, "  {}", error.red());
    }
    text
}
