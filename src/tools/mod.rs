//! Reservation tools.
//!
//! Tools are what the agent host calls. Each one validates its arguments,
//! talks to SevenRooms through the shared client and renders the outcome as
//! JSON with a human-readable `message`.

pub mod builtin;

mod registry;
mod tool;

use std::sync::Arc;

pub use registry::ToolRegistry;
pub use tool::{Tool, ToolError, ToolOutput, ToolSchema};

use crate::availability::AvailabilityQuery;
use crate::directory::RestaurantDirectory;
use crate::sevenrooms::SevenRoomsClient;

/// Register every built-in tool.
pub fn register_builtin_tools(
    registry: &mut ToolRegistry,
    client: Arc<SevenRoomsClient>,
    directory: Arc<RestaurantDirectory>,
    query: Arc<AvailabilityQuery>,
) {
    registry.register(Arc::new(builtin::FindAvailableTimeTool::new(query)));
    registry.register(Arc::new(builtin::MakeReservationTool::new(
        Arc::clone(&client),
        Arc::clone(&directory),
    )));
    registry.register(Arc::new(builtin::CancelReservationTool::new(Arc::clone(
        &client,
    ))));
    registry.register(Arc::new(builtin::FindMyReservationTool::new(client)));
    registry.register(Arc::new(builtin::ListRestaurantsTool::new(directory)));
}
