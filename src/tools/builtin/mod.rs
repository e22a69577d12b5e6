//! Built-in reservation tools.

mod cancel_reservation;
mod find_available_time;
mod find_my_reservation;
mod list_restaurants;
mod make_reservation;

pub use cancel_reservation::CancelReservationTool;
pub use find_available_time::FindAvailableTimeTool;
pub use find_my_reservation::FindMyReservationTool;
pub use list_restaurants::ListRestaurantsTool;
pub use make_reservation::{MAX_PARTY_SIZE, MakeReservationTool, validate_booking};
