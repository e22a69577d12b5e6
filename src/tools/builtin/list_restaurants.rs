//! Restaurant listing tool.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::directory::RestaurantDirectory;
use crate::tools::tool::{Tool, ToolError, ToolOutput};

/// Lists the restaurants that can be booked.
pub struct ListRestaurantsTool {
    directory: Arc<RestaurantDirectory>,
}

impl ListRestaurantsTool {
    pub fn new(directory: Arc<RestaurantDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for ListRestaurantsTool {
    fn name(&self) -> &str {
        "list_reservation"
    }

    fn description(&self) -> &str {
        "List all the restaurants available in the system"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let names = self.directory.names();
        Ok(ToolOutput::success(
            serde_json::json!({
                "restaurants": names,
                "message": format!("Restaurants available for booking:\n{}", names.join("\n")),
            }),
            start.elapsed(),
        ))
    }
}
