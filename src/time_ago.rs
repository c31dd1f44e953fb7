//! Reverse "time ago" labels into the earliest matching date
//!
//! Pinterest floors relative ages to a whole unit: "2 minutes ago" stays on
//! screen until the pin is three minutes old. The earliest moment a label can
//! describe is therefore one second short of the next whole unit.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Errors produced when reading a time-ago label
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeAgoError {
    #[error("Empty time-ago text")]
    Empty,

    #[error("Invalid time-ago value: '{0}'")]
    InvalidValue(String),

    #[error("Unknown time unit: '{0}'. Valid units: minute, hour, day, week, year")]
    UnknownUnit(String),
}

/// Units used in time-ago labels; months are never shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Year,
}

impl TimeUnit {
    /// Parses a unit name, singular or plural, ignoring case
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        match singular {
            "minute" => Some(TimeUnit::Minute),
            "hour" => Some(TimeUnit::Hour),
            "day" => Some(TimeUnit::Day),
            "week" => Some(TimeUnit::Week),
            "year" => Some(TimeUnit::Year),
            _ => None,
        }
    }

    /// Length of one unit
    pub fn duration(self) -> Duration {
        match self {
            TimeUnit::Minute => Duration::minutes(1),
            TimeUnit::Hour => Duration::hours(1),
            TimeUnit::Day => Duration::days(1),
            TimeUnit::Week => Duration::weeks(1),
            TimeUnit::Year => Duration::days(365),
        }
    }
}

/// Longest age a label of `value` units can stand for
pub fn earliest_time_ago(value: u16, unit: TimeUnit) -> Duration {
    unit.duration() * (i32::from(value) + 1) - Duration::seconds(1)
}

/// Earliest date a label such as "3 weeks ago" or "Just now" can refer to
pub fn earliest_date_from_time_ago_text(
    text: &str,
    from: DateTime<Utc>,
) -> Result<DateTime<Utc>, TimeAgoError> {
    let mut words = text.split_whitespace();
    let first = words.next().ok_or(TimeAgoError::Empty)?;

    if first.eq_ignore_ascii_case("just") {
        return Ok(from - Duration::seconds(59));
    }

    let value: u16 = first
        .parse()
        .map_err(|_| TimeAgoError::InvalidValue(first.to_string()))?;

    let unit_word = words.next().unwrap_or_default();
    let unit =
        TimeUnit::from_str(unit_word).ok_or_else(|| TimeAgoError::UnknownUnit(unit_word.to_string()))?;

    Ok(from - earliest_time_ago(value, unit))
}
