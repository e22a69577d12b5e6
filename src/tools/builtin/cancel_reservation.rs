//! Cancellation tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::sevenrooms::SevenRoomsClient;
use crate::tools::tool::{Tool, ToolError, ToolOutput, require_str};

/// Cancels a reservation identified by its confirmation number.
pub struct CancelReservationTool {
    client: Arc<SevenRoomsClient>,
}

impl CancelReservationTool {
    pub fn new(client: Arc<SevenRoomsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CancelReservationTool {
    fn name(&self) -> &str {
        "cancel_my_reservation"
    }

    fn description(&self) -> &str {
        "Cancel a restaurant reservation for the provided reservation number"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "confirmation_number": {
                    "type": "string",
                    "description": "Reservation number to cancel"
                }
            },
            "required": ["confirmation_number"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let confirmation_number = require_str(&params, "confirmation_number")?;
        let context = format!("Failed to cancel reservation {}", confirmation_number);

        // The API cancels by reservation id, which only the lookup returns.
        let reservation_id = self
            .client
            .find_reservation(confirmation_number)
            .await
            .map_err(|e| ToolError::from_reservation(&context, e))?
            .and_then(|r| r.reservation_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ToolError::ExecutionFailed(format!(
                    "{}: Reservation with confirmation number {} not found.",
                    context, confirmation_number
                ))
            })?;

        tracing::info!(call_id = %ctx.call_id, confirmation_number, "Cancelling reservation");

        self.client
            .cancel_reservation(&reservation_id)
            .await
            .map_err(|e| ToolError::from_reservation(&context, e))?;

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "cancelled",
                "confirmation_number": confirmation_number,
                "message": format!("Cancelled reservation {} successfully.", confirmation_number),
            }),
            start.elapsed(),
        ))
    }

    fn requires_approval(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{FakeSevenRooms, Route};

    #[tokio::test]
    async fn test_looks_up_then_cancels() {
        let fake = FakeSevenRooms::start().await;
        fake.set(
            Route::Reservations,
            200,
            json!({"data": {"results": [{"reservation_id": "res-42"}]}}),
        );
        let tool = CancelReservationTool::new(Arc::new(SevenRoomsClient::new(fake.config())));

        let output = tool
            .execute(json!({"confirmation_number": "ABC123"}), &CallContext::new())
            .await
            .unwrap();

        assert_eq!(
            output.message(),
            Some("Cancelled reservation ABC123 successfully.")
        );
        assert_eq!(
            fake.last_request(Route::Reservations).unwrap().query["reference_code"],
            "ABC123"
        );
        assert_eq!(
            fake.last_request(Route::Cancel).unwrap().path,
            "/reservations/res-42/cancel"
        );
    }

    #[tokio::test]
    async fn test_unknown_confirmation_number() {
        let fake = FakeSevenRooms::start().await;
        let tool = CancelReservationTool::new(Arc::new(SevenRoomsClient::new(fake.config())));

        let err = tool
            .execute(json!({"confirmation_number": "NOPE"}), &CallContext::new())
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("Reservation with confirmation number NOPE not found.")
        );
        assert_eq!(fake.calls(Route::Cancel), 0);
    }

    #[tokio::test]
    async fn test_cancel_failure_is_reported() {
        let fake = FakeSevenRooms::start().await;
        fake.set(
            Route::Reservations,
            200,
            json!({"data": {"results": [{"reservation_id": "res-42"}]}}),
        );
        fake.set_raw(Route::Cancel, 409, "already cancelled");
        let tool = CancelReservationTool::new(Arc::new(SevenRoomsClient::new(fake.config())));

        let err = tool
            .execute(json!({"confirmation_number": "ABC123"}), &CallContext::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to cancel reservation ABC123"));
        assert!(err.to_string().contains("409"));
    }
}
