//! Availability lookup tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::availability::{Availability, AvailabilityQuery, time};
use crate::context::CallContext;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};
use crate::validation::as_integer;

/// Finds bookable time slots for a restaurant.
pub struct FindAvailableTimeTool {
    query: Arc<AvailabilityQuery>,
}

impl FindAvailableTimeTool {
    pub fn new(query: Arc<AvailabilityQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl Tool for FindAvailableTimeTool {
    fn name(&self) -> &str {
        "find_available_time"
    }

    fn description(&self) -> &str {
        "Find available time slots for a restaurant by date, time and party size"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "restaurant": {
                    "type": "string",
                    "description": "Restaurant Name"
                },
                "date": {
                    "type": "string",
                    "description": "Reservation date (YYYY-MM-DD)"
                },
                "time": {
                    "type": "string",
                    "description": "Reservation time (HH:MM AM/PM)"
                },
                "party_size": {
                    "type": "integer",
                    "description": "Number of guests"
                }
            },
            "required": ["restaurant", "date", "time", "party_size"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();

        let restaurant = require_str(&params, "restaurant")?;
        let date = require_str(&params, "date")?;
        let requested_time = require_str(&params, "time")?;
        let party_size = params
            .get("party_size")
            .and_then(as_integer)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ToolError::InvalidParameters("'party_size' must be a positive integer".to_string())
            })?;

        let start_time = time::to_24_hour(requested_time);

        let outcome = self
            .query
            .find(restaurant, date, &start_time, party_size)
            .await
            .map_err(|e| ToolError::from_reservation("Failed to retrieve availability", e))?;

        let result = match &outcome {
            Availability::Slots(_) => serde_json::json!({
                "status": outcome.kind(),
                "restaurant": restaurant,
                "date": date,
                "party_size": party_size,
                "available_times": outcome.slots(),
                "message": format!(
                    "Available time slots for {} on {} (party size {}):\n{}",
                    restaurant,
                    date,
                    party_size,
                    outcome.slots().join("\n")
                ),
            }),
            Availability::NoSlots => serde_json::json!({
                "status": outcome.kind(),
                "restaurant": restaurant,
                "date": date,
                "party_size": party_size,
                "available_times": outcome.slots(),
                "message": format!(
                    "No available time slots for {} on {} at {} for party size {}.",
                    restaurant, date, requested_time, party_size
                ),
            }),
            Availability::RestaurantNotFound { requested, known } => serde_json::json!({
                "status": outcome.kind(),
                "restaurants": known,
                "message": not_found_message(requested, known),
            }),
        };

        Ok(ToolOutput::success(result, start.elapsed()))
    }
}

/// Guidance shown when a restaurant name is not in the directory.
pub(crate) fn not_found_message(requested: &str, known: &[String]) -> String {
    format!(
        "{} not found in system. Here is the restaurant list.\n{}",
        requested,
        known.join("\n")
    )
}
