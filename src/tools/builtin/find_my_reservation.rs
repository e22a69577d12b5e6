//! Reservation lookup tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::sevenrooms::{Reservation, SevenRoomsClient};
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};

pub struct FindMyReservationTool {
    client: Arc<SevenRoomsClient>,
}

impl FindMyReservationTool {
    pub fn new(client: Arc<SevenRoomsClient>) -> Self {
        Self { client }
    }
}

fn summary(reservation: &Reservation) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    format!(
        "Your Reservations: {} at {} for {} guests. Reservation under {}.",
        field(&reservation.date),
        field(&reservation.arrival_time),
        field(&reservation.max_guests),
        reservation.guest_name()
    )
}

#[async_trait]
impl Tool for FindMyReservationTool {
    fn name(&self) -> &str {
        "find_my_reservation"
    }

    fn description(&self) -> &str {
        "Find a reservation by its confirmation number"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "confirmation_number": {
                    "type": "string",
                    "description": "Confirmation Number"
                }
            },
            "required": ["confirmation_number"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let confirmation_number = require_str(&params, "confirmation_number")?;

        let reservation = self
            .client
            .find_reservation(confirmation_number)
            .await
            .map_err(|e| ToolError::from_reservation("Failed to find reservation", e))?
            .ok_or_else(|| {
                ToolError::ExecutionFailed(format!(
                    "Reservation with confirmation number {} not found.",
                    confirmation_number
                ))
            })?;

        let message = summary(&reservation);
        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "ok",
                "reservation": reservation,
                "message": message,
            }),
            start.elapsed(),
        ))
    }
}
