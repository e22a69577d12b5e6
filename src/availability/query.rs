//! Availability lookups for a named restaurant.

use std::sync::Arc;

use serde::Serialize;

use super::slots::{SlotSet, extract_bookable_times};
use super::time;
use crate::directory::RestaurantDirectory;
use crate::error::ReservationError;
use crate::sevenrooms::SevenRoomsClient;

/// Length of the window queried after the requested start time.
pub const QUERY_WINDOW_HOURS: u32 = 2;

/// Parameters of a single availability request.
///
/// `end_time` wraps around midnight on the same clock face, so a late start
/// produces an end time numerically earlier than the start (`23:30` ->
/// `01:30`). That request is sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryWindow {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub party_size: u32,
}

impl QueryWindow {
    pub fn new(date: impl Into<String>, start_time: impl Into<String>, party_size: u32) -> Self {
        let start_time = start_time.into();
        let end_time = time::add_hours(&start_time, QUERY_WINDOW_HOURS);
        Self {
            date: date.into(),
            start_time,
            end_time,
            party_size,
        }
    }

    /// Query string pairs in the order the API documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("date", self.date.clone()),
            ("party_size", self.party_size.to_string()),
            ("start_time", self.start_time.clone()),
            ("end_time", self.end_time.clone()),
        ]
    }
}

/// Non-error outcome of an availability lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// At least one bookable slot.
    Slots(SlotSet),
    /// The venue answered but nothing is bookable in the window.
    NoSlots,
    /// The restaurant name is not in the directory.
    RestaurantNotFound {
        requested: String,
        known: Vec<String>,
    },
}

impl Availability {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Availability::Slots(_) => "ok",
            Availability::NoSlots => "no_slots",
            Availability::RestaurantNotFound { .. } => "not_found",
        }
    }

    /// Slots, empty unless the outcome is [`Availability::Slots`].
    pub fn slots(&self) -> &[String] {
        match self {
            Availability::Slots(slots) => slots.as_slice(),
            _ => &[],
        }
    }
}

/// Resolves a restaurant, queries its availability and assembles the slots.
pub struct AvailabilityQuery {
    client: Arc<SevenRoomsClient>,
    directory: Arc<RestaurantDirectory>,
}

impl AvailabilityQuery {
    pub fn new(client: Arc<SevenRoomsClient>, directory: Arc<RestaurantDirectory>) -> Self {
        Self { client, directory }
    }

    /// Find bookable slots starting from `start_time` (24-hour `HH:MM`).
    ///
    /// Unknown restaurants and empty results are outcomes, not errors.
    /// Configuration, auth and upstream failures are returned as
    /// [`ReservationError`] after a single attempt.
    pub async fn find(
        &self,
        restaurant: &str,
        date: &str,
        start_time: &str,
        party_size: u32,
    ) -> Result<Availability, ReservationError> {
        let Some(venue) = self.directory.find(restaurant) else {
            tracing::info!(restaurant, "Restaurant not in directory");
            return Ok(Availability::RestaurantNotFound {
                requested: restaurant.to_string(),
                known: self.directory.names(),
            });
        };

        let window = QueryWindow::new(date, start_time, party_size);
        let payload = self
            .client
            .venue_availability(&venue.venue_id, &window)
            .await?;

        let slots = SlotSet::assemble(extract_bookable_times(&payload));
        tracing::debug!(
            restaurant = %venue.name,
            date,
            start_time = %window.start_time,
            end_time = %window.end_time,
            slots = slots.len(),
            "Availability assembled"
        );

        if slots.is_empty() {
            Ok(Availability::NoSlots)
        } else {
            Ok(Availability::Slots(slots))
        }
    }
}
