//! SevenRooms API integration.
//!
//! - `auth`: client-credentials token acquisition and optional reuse
//! - `client`: venue availability, booking, lookup and cancellation
//! - `types`: request and response shapes, decoded leniently

pub mod auth;
mod client;
pub mod types;

pub use auth::{CachedTokenProvider, ClientCredentialsProvider, Credential, TokenProvider};
pub use client::{BOOKING_SOURCE, SevenRoomsClient};
pub use types::{AvailabilityPayload, BookingConfirmation, BookingRequest, Reservation};
