//! SevenRooms OAuth client-credentials authentication.
//!
//! [`ClientCredentialsProvider`] performs one identity round trip per
//! `acquire()`. Callers acquire before every upstream operation; nothing
//! tracks token expiry. [`CachedTokenProvider`] can be layered on top to
//! reuse a token for a fixed time without changing call sites.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, RwLock};

use crate::config::{ENV_BASE, ENV_CLIENT_ID, ENV_CLIENT_SECRET, SevenRoomsConfig};
use crate::error::{AuthError, ConfigError};

/// Opaque bearer credential for the SevenRooms API.
pub type Credential = SecretString;

/// Source of credentials for upstream calls.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a credential. May perform a network round trip.
    async fn acquire(&self) -> Result<Credential, AuthError>;

    /// Called when the upstream rejected a credential with 401.
    ///
    /// Providers that reuse tokens must forget the rejected one here.
    async fn handle_auth_failure(&self) {}
}

/// Exchanges the client id and secret for a token at `POST {base}/auth`.
pub struct ClientCredentialsProvider {
    client: Client,
    config: SevenRoomsConfig,
}

impl ClientCredentialsProvider {
    pub fn new(client: Client, config: SevenRoomsConfig) -> Self {
        Self { client, config }
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        let missing: Vec<String> = [
            (ENV_BASE, self.config.base_url.is_empty()),
            (ENV_CLIENT_ID, self.config.client_id.is_empty()),
            (
                ENV_CLIENT_SECRET,
                self.config.client_secret.expose_secret().is_empty(),
            ),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(key, _)| key.to_string())
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingEnv(missing))
        }
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsProvider {
    async fn acquire(&self) -> Result<Credential, AuthError> {
        self.check_config()?;

        let url = self.config.url("auth");
        tracing::debug!(url = %url, "Requesting SevenRooms token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("SevenRooms auth request failed: {}", e);
                AuthError::Unreachable {
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| AuthError::Unreachable {
            reason: format!("failed to read auth response: {}", e),
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "SevenRooms auth rejected");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| AuthError::MissingToken)?;
        extract_token(&value)
            .map(SecretString::from)
            .ok_or(AuthError::MissingToken)
    }
}

/// First non-empty token among `data.token`, `token`, `access_token`.
fn extract_token(body: &serde_json::Value) -> Option<String> {
    [&body["data"]["token"], &body["token"], &body["access_token"]]
        .into_iter()
        .filter_map(|candidate| candidate.as_str())
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

/// Reuses a token from an inner provider for a fixed time.
pub struct CachedTokenProvider {
    inner: Arc<dyn TokenProvider>,
    ttl: Duration,
    cached: RwLock<Option<(Credential, Instant)>>,
    /// Keeps concurrent cold callers to a single identity round trip.
    refresh_lock: Mutex<()>,
}

impl CachedTokenProvider {
    pub fn new(inner: Arc<dyn TokenProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Drop the cached token so the next `acquire()` goes to the inner provider.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    async fn fresh(&self) -> Option<Credential> {
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|(_, acquired_at)| acquired_at.elapsed() < self.ttl)
            .map(|(token, _)| token.clone())
    }
}

#[async_trait]
impl TokenProvider for CachedTokenProvider {
    async fn acquire(&self) -> Result<Credential, AuthError> {
        if let Some(token) = self.fresh().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.fresh().await {
            return Ok(token);
        }

        let token = self.inner.acquire().await?;
        *self.cached.write().await = Some((token.clone(), Instant::now()));
        tracing::debug!(ttl_secs = self.ttl.as_secs(), "Cached SevenRooms token");
        Ok(token)
    }

    async fn handle_auth_failure(&self) {
        tracing::info!("SevenRooms rejected the cached token, dropping it");
        self.invalidate().await;
        self.inner.handle_auth_failure().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::testing::{FAKE_TOKEN, FakeSevenRooms, Route};

    fn provider_for(config: SevenRoomsConfig) -> ClientCredentialsProvider {
        ClientCredentialsProvider::new(Client::new(), config)
    }

    #[test]
    fn test_extract_token_order() {
        assert_eq!(
            extract_token(&json!({ "data": { "token": "a" }, "token": "b", "access_token": "c" })),
            Some("a".to_string())
        );
        assert_eq!(
            extract_token(&json!({ "data": { "token": "" }, "token": "b" })),
            Some("b".to_string())
        );
        assert_eq!(
            extract_token(&json!({ "data": "x", "access_token": "c" })),
            Some("c".to_string())
        );
        assert_eq!(extract_token(&json!({ "data": {} })), None);
        assert_eq!(extract_token(&json!([1, 2])), None);
    }

    #[tokio::test]
    async fn test_acquire_posts_client_credentials() {
        let fake = FakeSevenRooms::start().await;
        let token = provider_for(fake.config()).acquire().await.unwrap();

        assert_eq!(token.expose_secret(), FAKE_TOKEN);
        let request = fake.last_request(Route::Auth).unwrap();
        assert_eq!(
            request.form.get("grant_type").map(String::as_str),
            Some("client_credentials")
        );
        assert_eq!(request.form.get("client_id").map(String::as_str), Some("test-client"));
        assert_eq!(
            request.form.get("client_secret").map(String::as_str),
            Some("test-secret")
        );
    }

    #[tokio::test]
    async fn test_acquire_every_call_without_cache() {
        let fake = FakeSevenRooms::start().await;
        let provider = provider_for(fake.config());
        provider.acquire().await.unwrap();
        provider.acquire().await.unwrap();
        assert_eq!(fake.calls(Route::Auth), 2);
    }

    #[tokio::test]
    async fn test_rejected_status() {
        let fake = FakeSevenRooms::start().await;
        fake.set(Route::Auth, 403, json!({ "message": "nope" }));

        let err = provider_for(fake.config()).acquire().await.unwrap_err();
        match err {
            AuthError::Rejected { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("nope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_token_field() {
        let fake = FakeSevenRooms::start().await;
        fake.set(Route::Auth, 200, json!({ "data": { "expires": 3600 } }));

        let err = provider_for(fake.config()).acquire().await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_missing_config_fails_before_network() {
        let fake = FakeSevenRooms::start().await;
        let config = SevenRoomsConfig::new(fake.base_url(), "", "");

        let err = provider_for(config).acquire().await.unwrap_err();
        match err {
            AuthError::Config(ConfigError::MissingEnv(missing)) => {
                assert_eq!(missing, vec![ENV_CLIENT_ID, ENV_CLIENT_SECRET]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fake.calls(Route::Auth), 0);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Nothing listens on port 9 of the loopback interface.
        let config = SevenRoomsConfig::new("http://127.0.0.1:9", "id", "secret");
        let err = provider_for(config).acquire().await.unwrap_err();
        assert!(matches!(err, AuthError::Unreachable { .. }));
    }

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenProvider for CountingProvider {
        async fn acquire(&self) -> Result<Credential, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SecretString::from(format!("token-{}", n)))
        }
    }

    #[tokio::test]
    async fn test_cache_reuses_until_invalidated() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedTokenProvider::new(inner.clone(), Duration::from_secs(60));

        let first = cached.acquire().await.unwrap();
        let second = cached.acquire().await.unwrap();
        assert_eq!(first.expose_secret(), "token-0");
        assert_eq!(second.expose_secret(), "token-0");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

        cached.invalidate().await;
        let third = cached.acquire().await.unwrap();
        assert_eq!(third.expose_secret(), "token-1");

        cached.handle_auth_failure().await;
        let fourth = cached.acquire().await.unwrap();
        assert_eq!(fourth.expose_secret(), "token-2");
    }

    #[tokio::test]
    async fn test_cache_expires() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedTokenProvider::new(inner.clone(), Duration::ZERO);

        cached.acquire().await.unwrap();
        cached.acquire().await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cache_single_flight() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = Arc::new(CachedTokenProvider::new(inner.clone(), Duration::from_secs(60)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cached = cached.clone();
                tokio::spawn(async move { cached.acquire().await.map(|t| t.expose_secret().to_string()) })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "token-0");
        }
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
