//! Booking tool.

use std::sync::{Arc, LazyLock};
use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;

use crate::context::CallContext;
use crate::directory::RestaurantDirectory;
use crate::sevenrooms::{BookingRequest, SevenRoomsClient};
use crate::tools::builtin::find_available_time::not_found_message;
use crate::tools::tool::{Tool, ToolError, ToolOutput};
use crate::validation::{FieldValidator, ValidationErrorCode};

/// Largest party the booking tool accepts.
pub const MAX_PARTY_SIZE: u32 = 8;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}\s?(AM|PM|am|pm)$").expect("time pattern is valid")
});

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\- ]{7,15}$").expect("phone pattern is valid"));

/// Books a table at a directory restaurant.
pub struct MakeReservationTool {
    client: Arc<SevenRoomsClient>,
    directory: Arc<RestaurantDirectory>,
}

impl MakeReservationTool {
    pub fn new(client: Arc<SevenRoomsClient>, directory: Arc<RestaurantDirectory>) -> Self {
        Self { client, directory }
    }
}

/// Check every booking field, reporting all problems together.
pub fn validate_booking(params: &serde_json::Value) -> Result<BookingRequest, ToolError> {
    let mut v = FieldValidator::new(params);

    let date = v.matching("date", &DATE_PATTERN, "Date must be in YYYY-MM-DD format");
    let date = date.filter(|d| {
        let real = NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok();
        if !real {
            v.reject("date", "Date is not a real calendar date", ValidationErrorCode::OutOfRange);
        }
        real
    });
    let time = v.matching(
        "time",
        &TIME_PATTERN,
        "Time must be in HH:MM AM/PM format (e.g., 7:30 PM)",
    );
    let party_size = v.integer_in("party_size", 1, MAX_PARTY_SIZE);
    let first_name = v.required_str("first_name", "First name cannot be empty");
    let last_name = v.required_str("last_name", "Last name cannot be empty");
    let email = v.matching("email", &EMAIL_PATTERN, "Must be a valid email address");
    let phone = v.matching(
        "phone",
        &PHONE_PATTERN,
        "Phone must be 7-15 digits (allow +, space, -)",
    );
    let restaurant = v.required_str("restaurant", "Restaurant name cannot be empty");
    let loyalty_id = v.optional_str("playerId");

    let result = v.finish();
    match (
        date, time, party_size, first_name, last_name, email, phone, restaurant,
    ) {
        (
            Some(date),
            Some(time),
            Some(party_size),
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(phone),
            Some(restaurant),
        ) if result.is_valid => Ok(BookingRequest {
            date,
            time,
            party_size,
            first_name,
            last_name,
            email,
            phone,
            restaurant,
            loyalty_id,
        }),
        _ => Err(ToolError::InvalidParameters(format!(
            "Validation failed:\n{}",
            result.describe()
        ))),
    }
}

#[async_trait]
impl Tool for MakeReservationTool {
    fn name(&self) -> &str {
        "make_reservations"
    }

    fn description(&self) -> &str {
        "Make a restaurant reservation with SevenRooms"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
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
                    "minimum": 1,
                    "maximum": MAX_PARTY_SIZE,
                    "description": "Number of guests"
                },
                "first_name": { "type": "string", "description": "Guest first name" },
                "last_name": { "type": "string", "description": "Guest last name" },
                "email": { "type": "string", "description": "Guest email" },
                "phone": { "type": "string", "description": "Guest phone number" },
                "restaurant": { "type": "string", "description": "Restaurant Name" },
                "playerId": { "type": "string", "description": "Optional player ID" }
            },
            "required": [
                "date", "time", "party_size", "first_name", "last_name",
                "email", "phone", "restaurant"
            ]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CallContext,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();
        let booking = validate_booking(&params)?;

        let Some(venue) = self.directory.find(&booking.restaurant) else {
            let known = self.directory.names();
            return Ok(ToolOutput::success(
                serde_json::json!({
                    "status": "not_found",
                    "restaurants": known,
                    "message": not_found_message(&booking.restaurant, &known),
                }),
                start.elapsed(),
            ));
        };

        tracing::info!(call_id = %ctx.call_id, restaurant = %venue.name, "Making reservation");

        let confirmation = self
            .client
            .book(&venue.venue_id, &booking)
            .await
            .map_err(|e| ToolError::from_reservation("Failed to make reservation", e))?;

        Ok(ToolOutput::success(
            serde_json::json!({
                "status": "ok",
                "confirmation_number": confirmation.confirmation_number,
                "message": format!(
                    "Reservation successful. Your confirmation number: {}",
                    confirmation.confirmation_number
                ),
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
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::testing::{FakeSevenRooms, Route};

    fn valid_params() -> serde_json::Value {
        json!({
            "date": "2025-06-01",
            "time": "7:30 PM",
            "party_size": 4,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "+1 702-555-0100",
            "restaurant": "Casa Playa"
        })
    }

    fn tool(fake: &FakeSevenRooms) -> MakeReservationTool {
        MakeReservationTool::new(
            Arc::new(SevenRoomsClient::new(fake.config())),
            Arc::new(RestaurantDirectory::builtin()),
        )
    }

    #[test]
    fn test_valid_booking() {
        let booking = validate_booking(&valid_params()).unwrap();
        assert_eq!(booking.party_size, 4);
        assert_eq!(booking.time, "7:30 PM");
        assert_eq!(booking.loyalty_id, None);
    }

    #[test]
    fn test_reports_every_violation() {
        let params = json!({
            "date": "06/01/2025",
            "time": "19:30",
            "party_size": 9,
            "first_name": "",
            "last_name": "Lovelace",
            "email": "not-an-email",
            "phone": "12",
            "restaurant": "Casa Playa"
        });
        let err = validate_booking(&params).unwrap_err().to_string();
        for field in ["date:", "time:", "party_size:", "first_name:", "email:", "phone:"] {
            assert!(err.contains(field), "missing {} in {}", field, err);
        }
        assert!(!err.contains("last_name:"));
        assert!(err.contains("Must be at most 8"));
    }

    #[test]
    fn test_rejects_impossible_date() {
        let mut params = valid_params();
        params["date"] = json!("2025-02-30");
        let err = validate_booking(&params).unwrap_err().to_string();
        assert!(err.contains("date: Date is not a real calendar date"));
    }

    #[tokio::test]
    async fn test_books_and_returns_confirmation() {
        let fake = FakeSevenRooms::start().await;
        fake.set(
            Route::Book,
            200,
            json!({"data": {"reservation_reference_code": "ABC123"}}),
        );
        let mut params = valid_params();
        params["playerId"] = json!("P-77");

        let output = tool(&fake)
            .execute(params, &CallContext::new())
            .await
            .unwrap();

        assert_eq!(output.result["confirmation_number"], "ABC123");
        assert_eq!(
            output.message(),
            Some("Reservation successful. Your confirmation number: ABC123")
        );
        let request = fake.last_request(Route::Book).unwrap();
        assert_eq!(request.form["time"], "7:30 PM");
        assert_eq!(request.form["source"], "copilot-agent");
        assert_eq!(request.form["loyalty_id"], "P-77");
    }

    #[tokio::test]
    async fn test_unknown_restaurant_skips_booking() {
        let fake = FakeSevenRooms::start().await;
        let mut params = valid_params();
        params["restaurant"] = json!("Nobu");

        let output = tool(&fake)
            .execute(params, &CallContext::new())
            .await
            .unwrap();
        assert_eq!(output.result["status"], "not_found");
        assert_eq!(fake.calls(Route::Auth), 0);
        assert_eq!(fake.calls(Route::Book), 0);
    }

    #[tokio::test]
    async fn test_upstream_rejection_message() {
        let fake = FakeSevenRooms::start().await;
        fake.set(Route::Book, 400, json!({"message": "Slot no longer available"}));

        let err = tool(&fake)
            .execute(valid_params(), &CallContext::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Slot no longer available"));
    }

    #[test]
    fn test_requires_approval() {
        let directory = Arc::new(RestaurantDirectory::builtin());
        let client = Arc::new(SevenRoomsClient::new(crate::config::SevenRoomsConfig::new(
            "http://127.0.0.1:1",
            "id",
            "secret",
        )));
        assert!(MakeReservationTool::new(client, directory).requires_approval());
    }
}
