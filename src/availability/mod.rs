//! Bookable slot computation.
//!
//! Turns a raw SevenRooms availability payload into an ordered,
//! duplicate-free list of `HH:MM` slots:
//!
//! ```text
//! AvailabilityQuery::find
//!   -> directory lookup      (unknown name => RestaurantNotFound)
//!   -> QueryWindow           (start + 2h, wrapping at midnight)
//!   -> SevenRoomsClient      (token, then GET availability)
//!   -> extract_bookable_times
//!   -> SlotSet::assemble     (dedupe, chronological sort)
//! ```

mod query;
mod slots;
pub mod time;

pub use query::{Availability, AvailabilityQuery, QUERY_WINDOW_HOURS, QueryWindow};
pub use slots::{BOOKABLE_MARKER, SlotSet, extract_bookable_times};
pub use time::TimeOfDay;
