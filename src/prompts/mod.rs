//! Conversation prompts offered to the agent host.

pub mod builtin;

mod prompt;
mod registry;

use std::sync::Arc;

pub use prompt::{
    Prompt, PromptArgs, PromptArgument, PromptDescriptor, PromptError, PromptMessage,
    PromptResult, Role,
};
pub use registry::PromptRegistry;

use crate::directory::RestaurantDirectory;

/// Register every built-in prompt.
pub fn register_builtin_prompts(registry: &mut PromptRegistry, directory: Arc<RestaurantDirectory>) {
    registry.register(Arc::new(builtin::ReservationAssistantPrompt));
    registry.register(Arc::new(builtin::FindReservationsPrompt));
    registry.register(Arc::new(builtin::CheckAvailabilityPrompt));
    registry.register(Arc::new(builtin::CancelReservationPrompt));
    registry.register(Arc::new(builtin::BrowseRestaurantsPrompt::new(directory)));
    registry.register(Arc::new(builtin::TroubleshootBookingPrompt));
}
