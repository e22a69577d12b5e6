//! Wall-clock time helpers for availability slots.
//!
//! Slot times travel as strings. These helpers never fail: unparseable input
//! is passed through unchanged, or sorts after every real time.

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;

/// Sort key for times that cannot be parsed. Greater than any real time.
pub const UNPARSEABLE_MINUTES: u32 = u32::MAX;

const MINUTES_PER_DAY: u32 = 24 * 60;

static CLOCK_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})$").expect("clock shape pattern is valid")
});

static TWELVE_HOUR_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})\s?([AaPp][Mm])$").expect("12-hour pattern is valid")
});

/// A validated 24-hour time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time, returning `None` if out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parse `H:M`, `H:MM`, `HH:M` or `HH:MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.split_once(':')?;
        let hour = parse_component(h)?;
        let minute = parse_component(m)?;
        Self::new(hour, minute)
    }

    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    /// Minutes since midnight, in `0..1440`.
    pub fn minutes(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Add whole hours, wrapping around midnight on the same clock face.
    pub fn add_hours(&self, hours: u32) -> Self {
        Self {
            hour: ((u32::from(self.hour) + hours % 24) % 24) as u8,
            minute: self.minute,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn parse_component(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Minutes since midnight, or [`UNPARSEABLE_MINUTES`] when `t` is not a time.
pub fn to_minutes(t: &str) -> u32 {
    TimeOfDay::parse(t)
        .map(|time| time.minutes())
        .unwrap_or(UNPARSEABLE_MINUTES)
}

/// Add `hours` to `t` with 24-hour wraparound, zero-padding the result.
/// Unparseable input is returned unchanged.
pub fn add_hours(t: &str, hours: u32) -> String {
    match TimeOfDay::parse(t) {
        Some(time) => time.add_hours(hours).to_string(),
        None => t.to_string(),
    }
}

/// Zero-pad the hour of an `H:MM` time. Anything else passes through.
pub fn normalize(t: &str) -> String {
    let Some(caps) = CLOCK_SHAPE.captures(t) else {
        return t.to_string();
    };
    match caps[1].parse::<u8>() {
        Ok(hour) => format!("{:02}:{}", hour, &caps[2]),
        Err(_) => t.to_string(),
    }
}

/// Convert `H:MM AM/PM` to 24-hour `HH:MM`. Other input passes through.
pub fn to_24_hour(t: &str) -> String {
    let trimmed = t.trim();
    if !TWELVE_HOUR_SHAPE.is_match(trimmed) {
        return trimmed.to_string();
    }
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    match NaiveTime::parse_from_str(&compact, "%I:%M%p") {
        Ok(time) => TimeOfDay::from_minutes(time.num_seconds_from_midnight() / 60).to_string(),
        Err(_) => trimmed.to_string(),
    }
}
