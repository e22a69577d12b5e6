//! Restaurant reservation tools, prompts and resources backed by SevenRooms.
//!
//! The heart of the crate is the availability pipeline in [`availability`]:
//! resolve a restaurant, fetch its availability window, keep only bookable
//! entries, and return them deduplicated in chronological order.

pub mod availability;
pub mod cli;
pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod sevenrooms;
pub mod tools;
pub mod validation;

#[cfg(test)]
mod testing;

pub use availability::{Availability, AvailabilityQuery, SlotSet};
pub use config::SevenRoomsConfig;
pub use error::{AuthError, ConfigError, ReservationError, UpstreamError};
pub use server::ReservationServer;
