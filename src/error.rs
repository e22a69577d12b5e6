//! Error types for the reservation core.

use std::time::Duration;

/// Configuration errors. Raised before any network call is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Errors acquiring a credential from the identity endpoint.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("SevenRooms auth endpoint unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("SevenRooms auth failed ({status}) {body}")]
    Rejected { status: u16, body: String },

    #[error("SevenRooms auth response did not include a token")]
    MissingToken,
}

/// Errors from the reservation endpoints once a credential is in hand.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl UpstreamError {
    /// HTTP status carried by the error, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(timeout)
        } else {
            UpstreamError::RequestFailed {
                reason: err.to_string(),
            }
        }
    }
}

/// Any failure of a reservation operation, as seen by tool handlers.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(AuthError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl From<AuthError> for ReservationError {
    fn from(err: AuthError) -> Self {
        // Missing configuration is reported as such even when it surfaces
        // through the token provider.
        match err {
            AuthError::Config(config) => ReservationError::Config(config),
            other => ReservationError::Auth(other),
        }
    }
}

impl ReservationError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ReservationError::Config(_) => "config_error",
            ReservationError::Auth(_) => "auth_error",
            ReservationError::Upstream(_) => "upstream_error",
        }
    }
}
