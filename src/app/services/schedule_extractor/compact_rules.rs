//! `Schedule:Compact` rule blocks
//!
//! A compact schedule's rule fields are a flat sequence of `Through:`,
//! `For:`, `Interpolate:` and `Until:` markers with their values. This module
//! groups them into date blocks holding day blocks, each with its expanded
//! day vector, and renders the date ranges the blocks cover.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::expansion::expand_time_value_pairs_with_resolution;
use crate::app::models::TimeValuePair;
use crate::constants::month_number;

const THROUGH_PREFIX: &str = "through:";
const FOR_PREFIX: &str = "for:";
const UNTIL_PREFIX: &str = "until:";
const INTERPOLATE_PREFIX: &str = "interpolate:";

/// Day types used when a block has `Until:` entries before any `For:`
const DEFAULT_DAY_TYPE: &str = "AllDays";

/// Day of the year a date block runs through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThroughDate {
    pub month: u32,
    pub day: u32,
}

impl ThroughDate {
    pub const START_OF_YEAR: Self = Self { month: 1, day: 1 };
    pub const END_OF_YEAR: Self = Self { month: 12, day: 31 };

    /// Build a date, rejecting impossible month/day numbers
    pub fn new(month: u32, day: u32) -> Option<Self> {
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { month, day })
    }

    /// `dd/mm` label
    pub fn label(&self) -> String {
        format!("{:02}/{:02}", self.day, self.month)
    }
}

impl Ord for ThroughDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.month, self.day).cmp(&(other.month, other.day))
    }
}

impl PartialOrd for ThroughDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ThroughDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Classification of a `Through:`/`For:` rule field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeSpec {
    /// `Through: 31 Dec`, `Through: Dec 31` or `Through: 12/31`
    ThroughDate(ThroughDate),
    /// `For: Weekdays SummerDesignDay`, lowercased
    DayType(String),
    /// Anything else, including a `Through:` date that does not parse
    Unknown,
}

/// Classify a date-range rule field
pub fn parse_date_range(field: &str) -> DateRangeSpec {
    let lowered = field.trim().to_lowercase();

    if let Some(date) = lowered.strip_prefix(THROUGH_PREFIX) {
        return parse_through_date(date.trim())
            .map(DateRangeSpec::ThroughDate)
            .unwrap_or(DateRangeSpec::Unknown);
    }

    if let Some(days) = lowered.strip_prefix(FOR_PREFIX) {
        return DateRangeSpec::DayType(days.trim().to_string());
    }

    DateRangeSpec::Unknown
}

fn parse_through_date(date: &str) -> Option<ThroughDate> {
    let date = date.trim_end_matches(',').trim();

    if let Some((month, day)) = date.split_once('/') {
        return ThroughDate::new(month.trim().parse().ok()?, day.trim().parse().ok()?);
    }

    let mut parts = date.split_whitespace();
    let first = parts.next()?;
    let second = parts.next()?;
    match first.parse::<u32>() {
        Ok(day) => ThroughDate::new(month_number(second)?, day),
        Err(_) => ThroughDate::new(month_number(first)?, second.parse().ok()?),
    }
}

/// `Until:` pairs for a set of day types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBlock {
    pub day_types: Vec<String>,
    pub pairs: Vec<TimeValuePair>,
    pub values: Vec<String>,
}

/// Day blocks in effect up to a through-date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBlock {
    pub through: ThroughDate,
    pub day_blocks: Vec<DayBlock>,
}

/// Group compact rule fields into rule blocks
///
/// `Until: HH:MM` takes its value from the next field, or from the text after
/// a comma within the same field. Rules before the first `Through:` belong to
/// a block running to 31 Dec, and pairs before the first `For:` to an
/// `AllDays` day block. `Interpolate:` fields are ignored.
pub fn parse_compact_rules(raw_rules: &[String], slot_minutes: u32) -> Vec<RuleBlock> {
    let mut blocks: Vec<RuleBlock> = Vec::new();
    let mut fields = raw_rules.iter().map(|field| field.trim()).peekable();

    while let Some(field) = fields.next() {
        let lowered = field.to_lowercase();

        if lowered.starts_with(THROUGH_PREFIX) {
            let through = match parse_date_range(field) {
                DateRangeSpec::ThroughDate(date) => date,
                _ => {
                    warn!("Unparsable through date '{}', using 31/12", field);
                    ThroughDate::END_OF_YEAR
                }
            };
            blocks.push(RuleBlock {
                through,
                day_blocks: Vec::new(),
            });
        } else if lowered.starts_with(FOR_PREFIX) {
            let day_types = field
                .get(FOR_PREFIX.len()..)
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            current_block(&mut blocks).day_blocks.push(DayBlock {
                day_types,
                pairs: Vec::new(),
                values: Vec::new(),
            });
        } else if lowered.starts_with(INTERPOLATE_PREFIX) {
            continue;
        } else if lowered.starts_with(UNTIL_PREFIX) {
            let rest = field.get(UNTIL_PREFIX.len()..).unwrap_or_default().trim();
            let (time, value) = match rest.split_once(',') {
                Some((time, value)) => (time.trim(), value.trim().to_string()),
                None => {
                    let value = fields
                        .next_if(|next| !is_rule_marker(next))
                        .unwrap_or_default()
                        .to_string();
                    (rest, value)
                }
            };
            current_day_block(&mut blocks)
                .pairs
                .push(TimeValuePair::new(time, value));
        } else {
            debug!("Ignoring compact rule field '{}'", field);
        }
    }

    for day_block in blocks.iter_mut().flat_map(|block| block.day_blocks.iter_mut()) {
        day_block.values = expand_time_value_pairs_with_resolution(&day_block.pairs, slot_minutes);
    }

    blocks
}

fn is_rule_marker(field: &str) -> bool {
    let lowered = field.to_lowercase();
    [THROUGH_PREFIX, FOR_PREFIX, UNTIL_PREFIX, INTERPOLATE_PREFIX]
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

fn current_block(blocks: &mut Vec<RuleBlock>) -> &mut RuleBlock {
    if blocks.is_empty() {
        blocks.push(RuleBlock {
            through: ThroughDate::END_OF_YEAR,
            day_blocks: Vec::new(),
        });
    }
    let last = blocks.len() - 1;
    &mut blocks[last]
}

fn current_day_block(blocks: &mut Vec<RuleBlock>) -> &mut DayBlock {
    let block = current_block(blocks);
    if block.day_blocks.is_empty() {
        block.day_blocks.push(DayBlock {
            day_types: vec![DEFAULT_DAY_TYPE.to_string()],
            pairs: Vec::new(),
            values: Vec::new(),
        });
    }
    let last = block.day_blocks.len() - 1;
    &mut block.day_blocks[last]
}

/// `"dd/mm -> dd/mm"` label per block, ordered by through-date
///
/// The first range starts on 01/01; each later range starts on the previous
/// block's through-date.
pub fn date_range_labels(blocks: &[RuleBlock]) -> Vec<String> {
    let mut through_dates: Vec<ThroughDate> = blocks.iter().map(|block| block.through).collect();
    through_dates.sort();

    let mut start = ThroughDate::START_OF_YEAR;
    through_dates
        .into_iter()
        .map(|through| {
            let label = format!("{} -> {}", start, through);
            start = through;
            label
        })
        .collect()
}
