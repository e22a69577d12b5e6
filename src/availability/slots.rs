//! Bookable slot extraction and assembly.

use std::collections::HashSet;

use serde::Serialize;

use super::time::{self, TimeOfDay};
use crate::sevenrooms::types::AvailabilityPayload;

/// Type tag of a time entry that can be booked directly.
pub const BOOKABLE_MARKER: &str = "book";

/// Flatten every bucket and keep the normalized times of bookable entries.
///
/// Entries without the bookable marker or without any time field are
/// skipped. Order follows the payload.
pub fn extract_bookable_times(payload: &AvailabilityPayload) -> Vec<String> {
    payload
        .data
        .availability
        .iter()
        .flat_map(|bucket| bucket.times.iter())
        .filter(|entry| entry.kind.as_deref() == Some(BOOKABLE_MARKER))
        .filter_map(|entry| entry.time_value())
        .map(time::normalize)
        .collect()
}

/// Ordered, duplicate-free bookable times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotSet(Vec<String>);

impl SlotSet {
    /// Deduplicate and sort candidate times.
    ///
    /// Candidates that parse as a clock time are keyed and rendered as
    /// `HH:MM`, so `18:0` and `18:00` collapse into one slot. Unparseable
    /// candidates are kept verbatim, deduplicated by exact text, and sorted
    /// after every real time in first-seen order.
    pub fn assemble<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut slots: Vec<String> = candidates
            .into_iter()
            .map(|candidate| {
                let candidate = candidate.as_ref();
                match TimeOfDay::parse(candidate) {
                    Some(parsed) => parsed.to_string(),
                    None => candidate.to_string(),
                }
            })
            .filter(|slot| seen.insert(slot.clone()))
            .collect();

        // Stable sort keeps first-seen order among unparseable entries.
        slots.sort_by_key(|slot| time::to_minutes(slot));
        Self(slots)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
