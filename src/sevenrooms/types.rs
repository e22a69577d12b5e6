//! Types for SevenRooms API requests and responses.
//!
//! Response shapes are decoded leniently: a missing or mistyped field at any
//! level becomes its empty default instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `GET /venues/{venue_id}/availability`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityPayload {
    #[serde(default, deserialize_with = "or_default")]
    pub data: AvailabilityData,
}

impl AvailabilityPayload {
    /// Decode a raw JSON body. Never fails; unusable input yields no buckets.
    pub fn from_value(value: serde_json::Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityData {
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub availability: Vec<AvailabilityBucket>,
}

/// One availability bucket (typically a shift or seating area).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityBucket {
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub times: Vec<TimeEntry>,
}

/// A single time entry inside a bucket.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntry {
    /// Entry type tag, e.g. `book` or `request`.
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub datetime: Option<String>,
}

impl TimeEntry {
    /// The first non-empty of `time`, `start_time`, `datetime`.
    pub fn time_value(&self) -> Option<&str> {
        [&self.time, &self.start_time, &self.datetime]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|value| !value.is_empty())
    }
}

/// A reservation as returned by `GET /reservations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub reservation_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub arrival_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_guests: Option<String>,
}

impl Reservation {
    /// Guest name as "First Last", skipping absent parts.
    pub fn guest_name(&self) -> String {
        [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReservationSearch {
    #[serde(default, deserialize_with = "or_default")]
    pub data: ReservationResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReservationResults {
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub results: Vec<Reservation>,
}

/// Fields for `PUT /venues/{venue_id}/book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub restaurant: String,
    pub loyalty_id: Option<String>,
}

impl BookingRequest {
    /// Form fields in the order they are sent. `loyalty_id` is omitted when absent.
    pub fn form_fields(&self, source: &str) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("date", self.date.clone()),
            ("time", self.time.clone()),
            ("party_size", self.party_size.to_string()),
            ("first_name", self.first_name.clone()),
            ("last_name", self.last_name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("restaurant", self.restaurant.clone()),
            ("source", source.to_string()),
        ];
        if let Some(loyalty_id) = &self.loyalty_id {
            fields.push(("loyalty_id", loyalty_id.clone()));
        }
        fields
    }
}

/// Result of a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub confirmation_number: String,
}

/// Decode `T`, falling back to its default when the value has the wrong shape.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode a sequence, dropping elements that don't decode. Non-arrays are empty.
pub(crate) fn seq_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Accept strings and numbers as text; anything else is absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_availability_payload_shape() {
        let payload = AvailabilityPayload::from_value(json!({
            "data": {
                "availability": [
                    { "times": [ { "type": "book", "time": "18:00" } ] },
                    { "times": [] }
                ]
            }
        }));
        assert_eq!(payload.data.availability.len(), 2);
        assert_eq!(payload.data.availability[0].times[0].kind.as_deref(), Some("book"));
    }

    #[test]
    fn test_malformed_levels_decode_as_empty() {
        for body in [
            json!(null),
            json!("oops"),
            json!({}),
            json!({ "data": null }),
            json!({ "data": [] }),
            json!({ "data": { "availability": {} } }),
            json!({ "data": { "availability": "none" } }),
        ] {
            let payload = AvailabilityPayload::from_value(body.clone());
            assert!(payload.data.availability.is_empty(), "body: {}", body);
        }

        let payload = AvailabilityPayload::from_value(json!({
            "data": { "availability": [ null, 5, { "times": "x" }, { "times": [ null, "18:00", { "type": "book" } ] } ] }
        }));
        assert_eq!(payload.data.availability.len(), 2);
        assert!(payload.data.availability[0].times.is_empty());
        assert_eq!(payload.data.availability[1].times.len(), 1);
    }

    #[test]
    fn test_time_value_fallbacks() {
        let entry = TimeEntry {
            kind: Some("book".into()),
            time: Some(String::new()),
            start_time: None,
            datetime: Some("2025-01-01T19:00".into()),
        };
        assert_eq!(entry.time_value(), Some("2025-01-01T19:00"));
        assert_eq!(TimeEntry::default().time_value(), None);
    }

    #[test]
    fn test_reservation_lenient_fields() {
        let search: ReservationSearch = serde_json::from_value(json!({
            "data": { "results": [ {
                "reservation_id": "abc",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "arrival_time": "19:30",
                "date": "2025-03-01",
                "max_guests": 4
            } ] }
        }))
        .unwrap();
        let reservation = &search.data.results[0];
        assert_eq!(reservation.max_guests.as_deref(), Some("4"));
        assert_eq!(reservation.guest_name(), "Ada Lovelace");
    }

    #[test]
    fn test_booking_form_fields() {
        let request = BookingRequest {
            date: "2025-03-01".into(),
            time: "7:30 PM".into(),
            party_size: 2,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+1 555-0100".into(),
            restaurant: "Jardin".into(),
            loyalty_id: None,
        };
        let fields = request.form_fields("copilot-agent");
        assert_eq!(fields.len(), 9);
        assert!(fields.contains(&("party_size", "2".to_string())));
        assert!(fields.contains(&("source", "copilot-agent".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "loyalty_id"));
    }
}
