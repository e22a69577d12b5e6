//! `reservation://{restaurant}/{date}/{time}/{party}` resource.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Resource, ResourceContents, ResourceError, ResourceTemplate};
use crate::availability::{Availability, AvailabilityQuery, time};

const SCHEME: &str = "reservation://";

/// Segments of a slot URI after percent-decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUri {
    pub restaurant: String,
    pub date: String,
    pub time: String,
    pub party_size: u32,
}

impl SlotUri {
    pub fn parse(uri: &str) -> Result<Self, String> {
        let rest = uri
            .strip_prefix(SCHEME)
            .ok_or_else(|| format!("URI must start with {}", SCHEME))?;

        let segments = rest
            .split('/')
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.trim().to_string())
                    .map_err(|e| format!("Invalid percent-encoding in '{}': {}", s, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [restaurant, date, time, party] = <[String; 4]>::try_from(segments)
            .map_err(|_| "Expected reservation://{restaurant}/{date}/{time}/{party}".to_string())?;

        if [&restaurant, &date, &time, &party].iter().any(|s| s.is_empty()) {
            return Err("URI segments must not be empty".to_string());
        }
        let party_size = party
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("Party size must be a positive integer, got '{}'", party))?;

        Ok(Self {
            restaurant,
            date,
            time,
            party_size,
        })
    }
}

/// Availability for a restaurant, date, time and party size as JSON.
pub struct AvailableTimeSlotResource {
    query: Arc<AvailabilityQuery>,
}

impl AvailableTimeSlotResource {
    pub fn new(query: Arc<AvailabilityQuery>) -> Self {
        Self { query }
    }

    async fn lookup(&self, uri: &str) -> serde_json::Value {
        let slot = match SlotUri::parse(uri) {
            Ok(slot) => slot,
            Err(reason) => return serde_json::json!({ "error": reason }),
        };

        let start_time = time::to_24_hour(&slot.time);
        match self
            .query
            .find(&slot.restaurant, &slot.date, &start_time, slot.party_size)
            .await
        {
            Ok(Availability::Slots(slots)) => serde_json::json!({ "available_times": slots }),
            Ok(Availability::NoSlots) => {
                serde_json::json!({ "message": "No available time slots found" })
            }
            Ok(Availability::RestaurantNotFound { requested, known }) => serde_json::json!({
                "error": format!("{} not found in system", requested),
                "restaurants": known,
            }),
            Err(e) => {
                tracing::warn!(uri, kind = e.kind(), "Availability resource failed: {}", e);
                serde_json::json!({ "error": format!("Failed to retrieve availability: {}", e) })
            }
        }
    }
}

#[async_trait]
impl Resource for AvailableTimeSlotResource {
    fn template(&self) -> ResourceTemplate {
        ResourceTemplate {
            name: "available_time_slot".to_string(),
            title: "Available Time Slots".to_string(),
            uri_template: format!("{}{{restaurant}}/{{date}}/{{time}}/{{party}}", SCHEME),
            description: "Get available time slots for a restaurant, date, time and party size"
                .to_string(),
            mime_type: super::JSON_MIME.to_string(),
        }
    }

    fn matches(&self, uri: &str) -> bool {
        uri.starts_with(SCHEME)
    }

    async fn read(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let body = self.lookup(uri).await;
        ResourceContents::json(uri, &body)
    }
}
