//! SevenRooms reservation API client.
//!
//! Every operation acquires a credential first and sends it verbatim in the
//! `Authorization` header. Nothing is retried.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use super::auth::{CachedTokenProvider, ClientCredentialsProvider, TokenProvider};
use super::types::{
    AvailabilityPayload, BookingConfirmation, BookingRequest, Reservation, ReservationSearch,
};
use crate::availability::QueryWindow;
use crate::config::SevenRoomsConfig;
use crate::error::{ReservationError, UpstreamError};

/// Value of the `source` field on bookings made through this client.
pub const BOOKING_SOURCE: &str = "copilot-agent";

/// Client for the SevenRooms venue and reservation endpoints.
pub struct SevenRoomsClient {
    http: Client,
    config: SevenRoomsConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl SevenRoomsClient {
    /// Create a client that authenticates with the configured client credentials.
    pub fn new(config: SevenRoomsConfig) -> Self {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let credentials: Arc<dyn TokenProvider> =
            Arc::new(ClientCredentialsProvider::new(http.clone(), config.clone()));
        let tokens: Arc<dyn TokenProvider> = match config.token_ttl {
            Some(ttl) => Arc::new(CachedTokenProvider::new(credentials, ttl)),
            None => credentials,
        };

        Self {
            http,
            config,
            tokens,
        }
    }

    /// Fetch raw availability for a venue.
    pub async fn venue_availability(
        &self,
        venue_id: &str,
        window: &QueryWindow,
    ) -> Result<AvailabilityPayload, ReservationError> {
        let token = self.tokens.acquire().await?;
        let url = self.config.url(&format!(
            "venues/{}/availability",
            urlencoding::encode(venue_id)
        ));

        tracing::debug!(
            venue_id,
            date = %window.date,
            start_time = %window.start_time,
            end_time = %window.end_time,
            party_size = window.party_size,
            "Fetching venue availability"
        );

        let request = self
            .http
            .get(&url)
            .query(&window.query_pairs())
            .header("Authorization", token.expose_secret());
        let (status, body) = self.send(request).await?;
        ensure_success(status, &body)?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| UpstreamError::InvalidResponse {
                reason: format!("availability body is not JSON: {}", e),
            })?;
        Ok(AvailabilityPayload::from_value(value))
    }

    /// Book a table. Returns the reservation reference code.
    pub async fn book(
        &self,
        venue_id: &str,
        booking: &BookingRequest,
    ) -> Result<BookingConfirmation, ReservationError> {
        let token = self.tokens.acquire().await?;
        let url = self
            .config
            .url(&format!("venues/{}/book", urlencoding::encode(venue_id)));

        tracing::info!(venue_id, date = %booking.date, party_size = booking.party_size, "Booking reservation");

        let request = self
            .http
            .put(&url)
            .header("Authorization", token.expose_secret())
            .header("Accept", "application/json")
            .form(&booking.form_fields(BOOKING_SOURCE));
        let (status, body) = self.send(request).await?;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() {
            let message = value["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| fallback_body(&body));
            tracing::warn!(status = status.as_u16(), "Booking rejected: {}", message);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: message,
            }
            .into());
        }

        let confirmation_number = value["data"]["reservation_reference_code"]
            .as_str()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| UpstreamError::InvalidResponse {
                reason: "booking response did not include a reservation reference code"
                    .to_string(),
            })?
            .to_string();

        Ok(BookingConfirmation {
            confirmation_number,
        })
    }

    /// Look up a reservation by its confirmation (reference) code.
    pub async fn find_reservation(
        &self,
        reference_code: &str,
    ) -> Result<Option<Reservation>, ReservationError> {
        let token = self.tokens.acquire().await?;
        let url = self.config.url("reservations");

        tracing::debug!(reference_code, "Looking up reservation");

        let request = self
            .http
            .get(&url)
            .query(&[("reference_code", reference_code)])
            .header("Authorization", token.expose_secret());
        let (status, body) = self.send(request).await?;
        ensure_success(status, &body)?;

        let search: ReservationSearch = parse_lenient(&body);
        let reservation = search.data.results.into_iter().next();
        if reservation.is_none() {
            tracing::info!(reference_code, "No reservation found");
        }
        Ok(reservation)
    }

    /// Cancel a reservation by its SevenRooms reservation id.
    pub async fn cancel_reservation(&self, reservation_id: &str) -> Result<(), ReservationError> {
        let token = self.tokens.acquire().await?;
        let url = self.config.url(&format!(
            "reservations/{}/cancel",
            urlencoding::encode(reservation_id)
        ));

        tracing::info!(reservation_id, "Cancelling reservation");

        let request = self
            .http
            .post(&url)
            .header("Authorization", token.expose_secret())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json");
        let (status, body) = self.send(request).await?;
        ensure_success(status, &body)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), UpstreamError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("SevenRooms request failed: {}", e);
            UpstreamError::from_reqwest(e, self.config.timeout)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // The next call acquires a fresh token; this one is not retried.
            self.tokens.handle_auth_failure().await;
        }
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, self.config.timeout))?;

        tracing::debug!(status = status.as_u16(), "SevenRooms response");
        Ok((status, body))
    }
}

fn ensure_success(status: StatusCode, body: &str) -> Result<(), ReservationError> {
    if status.is_success() {
        return Ok(());
    }
    tracing::warn!(status = status.as_u16(), "SevenRooms returned an error status");
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body: fallback_body(body),
    }
    .into())
}

fn fallback_body(body: &str) -> String {
    if body.trim().is_empty() {
        "No body".to_string()
    } else {
        body.to_string()
    }
}

fn parse_lenient<T: DeserializeOwned + Default>(body: &str) -> T {
    serde_json::from_str(body).unwrap_or_default()
}
