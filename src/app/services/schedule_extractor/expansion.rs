//! Schedule time expansion
//!
//! Pure functions turning `Until:` time/value pairs into a fixed-width day
//! vector. Nothing here touches the record stream.

use tracing::warn;

use crate::app::models::TimeValuePair;
use crate::constants::{
    DEFAULT_SCHEDULE_VALUE, MAX_HOUR, MAX_MINUTE, MINUTES_PER_DAY, MINUTES_PER_HOUR,
};

/// Minutes since midnight for an `HH:MM` string
///
/// `24:00` is 1440. Other out-of-range components are clamped into 0..=23 and
/// 0..=59. Anything unparsable is treated as midnight.
pub fn time_str_to_minutes(time: &str) -> u32 {
    let Some((hours, minutes)) = split_time(time) else {
        warn!("Invalid time format: {}", time);
        return 0;
    };

    if hours == 24 && minutes == 0 {
        return MINUTES_PER_DAY;
    }

    let hours = hours.clamp(0, MAX_HOUR as i64) as u32;
    let minutes = minutes.clamp(0, MAX_MINUTE as i64) as u32;
    hours * MINUTES_PER_HOUR + minutes
}

/// Whether `time` is `H:MM`/`HH:MM` with hours in 0..=24 and minutes in 0..=59
pub fn validate_time_format(time: &str) -> bool {
    split_time(time)
        .is_some_and(|(hours, minutes)| (0..=24).contains(&hours) && (0..=59).contains(&minutes))
}

fn split_time(time: &str) -> Option<(i64, i64)> {
    let mut parts = time.split(':');
    let hours = parts.next()?.trim().parse().ok()?;
    let minutes = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((hours, minutes))
}

/// Render a schedule value consistently
///
/// Integral numbers print without a fraction, other numbers with two
/// decimals. Non-numeric and non-finite values pass through unchanged.
pub fn normalize_schedule_value(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => {
            if number.fract() == 0.0 {
                // -0.0 prints as "0"
                format!("{:.0}", number + 0.0)
            } else {
                format!("{:.2}", number)
            }
        }
        _ => value.to_string(),
    }
}

/// Expand pairs into 24 hourly values
pub fn expand_time_value_pairs(pairs: &[TimeValuePair]) -> Vec<String> {
    expand_time_value_pairs_with_resolution(pairs, MINUTES_PER_HOUR)
}

/// Expand pairs into `1440 / slot_minutes` values
///
/// Pairs are visited in ascending end time. Each fills the whole slots
/// between the previous boundary and its own end; a pair that does not move
/// past the current position is ignored. Slots left unfilled take the value
/// of the last pair as given (not as sorted), or `"0"` without pairs.
///
/// `slot_minutes` must be non-zero and divide a day; configuration
/// validation guarantees this for values coming from [`ExtractorConfig`].
///
/// [`ExtractorConfig`]: crate::config::ExtractorConfig
pub fn expand_time_value_pairs_with_resolution(
    pairs: &[TimeValuePair],
    slot_minutes: u32,
) -> Vec<String> {
    let slot_minutes = slot_minutes.max(1);
    let slot_count = (MINUTES_PER_DAY / slot_minutes) as usize;

    let Some(last) = pairs.last() else {
        return vec![DEFAULT_SCHEDULE_VALUE.to_string(); slot_count];
    };

    let mut slots: Vec<Option<&str>> = vec![None; slot_count];

    let mut sorted: Vec<(u32, &TimeValuePair)> = pairs
        .iter()
        .map(|pair| (time_str_to_minutes(&pair.end_time), pair))
        .collect();
    sorted.sort_by_key(|(minutes, _)| *minutes);

    let mut current_minute = 0;
    for (end_minute, pair) in sorted {
        if end_minute <= current_minute {
            continue;
        }

        let start_slot = (current_minute / slot_minutes) as usize;
        let end_slot = ((end_minute / slot_minutes) as usize).min(slot_count);
        for slot in slots.iter_mut().take(end_slot).skip(start_slot) {
            *slot = Some(pair.value.as_str());
        }

        current_minute = end_minute;
        if current_minute >= MINUTES_PER_DAY {
            break;
        }
    }

    slots
        .into_iter()
        .map(|slot| normalize_schedule_value(slot.unwrap_or(last.value.as_str())))
        .collect()
}
