//! Human-readable formatting of settings objects
//!
//! Every formatter receives the object's values with the keyword re-inserted
//! at position 0, so indices follow the model-file field numbering. A
//! formatter that cannot use its input yields `"Not Found"` for that key only.

use crate::constants::{
    MONTH_ABBREVIATIONS, MONTHLY_GRID_CELL_WIDTH, MONTHLY_GRID_COLUMNS, NOT_FOUND,
};

use super::catalog::normalize_keyword;

/// Field count below which a RunPeriod is not reported
const RUN_PERIOD_MIN_FIELDS: usize = 8;

/// RunPeriod flags are only reported when more than this many fields exist
const RUN_PERIOD_FLAG_THRESHOLD: usize = 13;

const RUN_PERIOD_FLAGS: [(usize, &str); 6] = [
    (8, "Use weather file holidays/special day periods"),
    (
        9,
        "Use WeatherFile DaylightSavingPeriod - will use daylight saving time",
    ),
    (
        10,
        "Apply Weekend Holiday Rule - will reassign weekend holidays to Monday",
    ),
    (11, "use weather file rain indicators"),
    (12, "use weather file snow indicators"),
    (13, "Treat Weather as Actual"),
];

const SIMULATION_CONTROL_LABELS: [&str; 5] = [
    "Do the zone sizing calculation",
    "Do the system sizing calculation",
    "Do the plant sizing calculation",
    "Do the design day calculation",
    "Do the weather file calculation",
];

/// Formatter selected for a catalog key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Version,
    RunPeriod,
    Timestep,
    ConvergenceLimits,
    SimulationControl,
    Location,
    /// Ground temperature and reflectance families
    MonthlySeries,
    /// Any other catalog key: values joined with `", "`
    Joined,
}

impl SettingKind {
    /// Pick the formatter for a catalog key
    pub fn for_key(key: &str) -> Self {
        let normalized = normalize_keyword(key);
        match normalized.as_str() {
            "version" => Self::Version,
            "runperiod" => Self::RunPeriod,
            "timestep" => Self::Timestep,
            "convergencelimits" => Self::ConvergenceLimits,
            "simulationcontrol" => Self::SimulationControl,
            _ if normalized.contains("location") => Self::Location,
            _ if normalized.contains("temperature") || normalized.contains("reflectance") => {
                Self::MonthlySeries
            }
            _ => Self::Joined,
        }
    }

    /// Format `values` (keyword at index 0)
    pub fn format(self, values: &[String], engine_name: &str) -> String {
        let formatted = match self {
            Self::Version => format_version(values, engine_name),
            Self::RunPeriod => format_run_period(values),
            Self::Timestep => format_timestep(values),
            Self::ConvergenceLimits => format_convergence_limits(values),
            Self::SimulationControl => format_simulation_control(values),
            Self::Location => format_location(values),
            Self::MonthlySeries => format_monthly_series(values),
            Self::Joined => (!values.is_empty()).then(|| values.join(", ")),
        };
        formatted.unwrap_or_else(|| NOT_FOUND.to_string())
    }
}

/// `"<Engine> Version <v>"`
pub fn format_version(values: &[String], engine_name: &str) -> Option<String> {
    values
        .get(1)
        .map(|version| format!("{} Version {}", engine_name, version))
}

pub fn format_timestep(values: &[String]) -> Option<String> {
    values
        .get(1)
        .map(|steps| format!("{} timesteps per hour", steps))
}

pub fn format_convergence_limits(values: &[String]) -> Option<String> {
    if values.len() < 3 {
        return None;
    }
    Some(format!(
        "Min System Time Step: {}\nMax HVAC Iterations: {}",
        values[1], values[2]
    ))
}

pub fn format_simulation_control(values: &[String]) -> Option<String> {
    if values.len() < 6 {
        return None;
    }
    let lines: Vec<String> = SIMULATION_CONTROL_LABELS
        .iter()
        .zip(&values[1..6])
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();
    Some(lines.join("\n"))
}

/// Place name, latitude, longitude, time zone and elevation
///
/// Fails as a whole when fewer than six values exist or any number is bad.
pub fn format_location(values: &[String]) -> Option<String> {
    if values.len() < 6 {
        return None;
    }
    let latitude = parse_number(&values[2])?;
    let longitude = parse_number(&values[3])?;
    let time_zone = parse_number(&values[4])?;
    let elevation = parse_number(&values[5])?;

    Some(
        [
            format!("Location: {}", values[1]),
            format!("Latitude: {}°", render_float(latitude)),
            format!("Longitude: {}°", render_float(longitude)),
            format!("Time Zone: GMT{}", render_float(time_zone)),
            format!("Elevation: {}m", render_float(elevation)),
        ]
        .join("\n"),
    )
}

/// Location, start date, end date and any enabled weather-file flags
pub fn format_run_period(values: &[String]) -> Option<String> {
    if values.len() < RUN_PERIOD_MIN_FIELDS {
        return None;
    }

    let location = values[1].split('(').next().unwrap_or_default().trim();
    let mut lines = vec![
        format!("Location: {}", location),
        format!("Start Date: {} {}, {}", values[2], values[3], values[4]),
        format!("End Date: {} {}, {}", values[5], values[6], values[7]),
    ];

    if values.len() > RUN_PERIOD_FLAG_THRESHOLD {
        let enabled: Vec<&str> = RUN_PERIOD_FLAGS
            .iter()
            .filter(|(index, _)| values[*index].eq_ignore_ascii_case("yes"))
            .map(|(_, label)| *label)
            .collect();

        if !enabled.is_empty() {
            lines.extend(enabled.iter().map(|label| label.to_string()));
            lines.push(String::new());
        }
    }

    Some(lines.join("\n"))
}

/// Month-labelled grid of every numeric value, four columns per row
pub fn format_monthly_series(values: &[String]) -> Option<String> {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|value| parse_number(value))
        .take(MONTH_ABBREVIATIONS.len())
        .collect();

    if numbers.is_empty() {
        return None;
    }

    let width = MONTHLY_GRID_CELL_WIDTH;
    let mut rows = Vec::new();
    for (months, chunk) in MONTH_ABBREVIATIONS
        .chunks(MONTHLY_GRID_COLUMNS)
        .zip(numbers.chunks(MONTHLY_GRID_COLUMNS))
    {
        let header: Vec<String> = months
            .iter()
            .take(chunk.len())
            .map(|month| format!("{:^width$}", month))
            .collect();
        let cells: Vec<String> = chunk
            .iter()
            .map(|value| format!("{:^width$.2}", value))
            .collect();

        rows.push(header.join("  "));
        rows.push(cells.join("  "));
        rows.push(String::new());
    }

    Some(rows.join("\n").trim_end().to_string())
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Shortest round-trip rendering that always shows a decimal point for
/// integral values (`31.0`, `-5.0`, `0.25`). Magnitudes below `1e-4` or
/// from `1e16` up switch to exponent form with a signed, two-digit
/// exponent (`1e-05`, `1.5e+20`).
fn render_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
