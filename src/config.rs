//! SevenRooms connection settings.
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file by the binary). All three connection values are required;
//! when any are missing the error names every missing variable at once.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

pub const ENV_BASE: &str = "SEVENROOMS_BASE";
pub const ENV_CLIENT_ID: &str = "SEVENROOMS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SEVENROOMS_CLIENT_SECRET";
pub const ENV_TIMEOUT_SECS: &str = "SEVENROOMS_TIMEOUT_SECS";
pub const ENV_TOKEN_TTL_SECS: &str = "SEVENROOMS_TOKEN_TTL_SECS";

/// Default bound on every upstream round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for the SevenRooms API.
#[derive(Debug, Clone)]
pub struct SevenRoomsConfig {
    /// API base URL without a trailing slash (e.g. https://api.sevenrooms.com/api-ext/2_4).
    pub base_url: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret. Never logged.
    pub client_secret: SecretString,
    /// Timeout applied to each HTTP request.
    pub timeout: Duration,
    /// How long an acquired token may be reused. `None` acquires per call.
    pub token_ttl: Option<Duration>,
}

impl SevenRoomsConfig {
    /// Build a config from explicit values with default timeout and no token reuse.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: trim_base(base_url.into()),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            timeout: DEFAULT_TIMEOUT,
            token_ttl: None,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reuse acquired tokens for `ttl`.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Load settings through a variable lookup, usually `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = read(ENV_BASE);
        let client_id = read(ENV_CLIENT_ID);
        let client_secret = read(ENV_CLIENT_SECRET);

        let missing: Vec<String> = [
            (ENV_BASE, base_url.is_none()),
            (ENV_CLIENT_ID, client_id.is_none()),
            (ENV_CLIENT_SECRET, client_secret.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(key, _)| key.to_string())
        .collect();

        let (Some(base_url), Some(client_id), Some(client_secret)) =
            (base_url, client_id, client_secret)
        else {
            return Err(ConfigError::MissingEnv(missing));
        };

        let timeout = match read(ENV_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(parse_secs(ENV_TIMEOUT_SECS, &raw)?),
            None => DEFAULT_TIMEOUT,
        };
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let token_ttl = match read(ENV_TOKEN_TTL_SECS) {
            Some(raw) => match parse_secs(ENV_TOKEN_TTL_SECS, &raw)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => None,
        };

        Ok(Self {
            base_url: trim_base(base_url),
            client_id,
            client_secret: SecretString::from(client_secret),
            timeout,
            token_ttl,
        })
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn trim_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("'{}' is not a whole number of seconds: {}", raw, e),
        })
}
