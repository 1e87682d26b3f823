//! Schedule extraction and time expansion
//!
//! - [`extractor`] - Deduplicating collector of `Schedule:Compact` definitions
//! - [`expansion`] - Time/value pair expansion into day vectors
//! - [`compact_rules`] - Grouping of compact rule fields into date and day blocks
//!
//! The expansion functions are independent of the record stream and can be
//! called directly by report code.

pub mod compact_rules;
pub mod expansion;
pub mod extractor;

#[cfg(test)]
pub mod tests;

pub use compact_rules::{
    DateRangeSpec, DayBlock, RuleBlock, ThroughDate, date_range_labels, parse_compact_rules,
    parse_date_range,
};
pub use expansion::{
    expand_time_value_pairs, expand_time_value_pairs_with_resolution, normalize_schedule_value,
    time_str_to_minutes, validate_time_format,
};
pub use extractor::ScheduleExtractor;
