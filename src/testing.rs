//! In-process fake of the SevenRooms API for tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};

use crate::config::SevenRoomsConfig;

/// Token handed out by the fake `/auth` endpoint.
pub const FAKE_TOKEN: &str = "fake-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Auth,
    Availability,
    Book,
    Reservations,
    Cancel,
}

/// What the fake saw for the most recent request on a route.
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct FakeState {
    canned: Mutex<HashMap<Route, Canned>>,
    calls: Mutex<HashMap<Route, usize>>,
    last: Mutex<HashMap<Route, RecordedRequest>>,
}

impl FakeState {
    async fn handle(&self, route: Route, uri: Uri, headers: HeaderMap, body: String) -> Response {
        let recorded = RecordedRequest {
            path: uri.path().to_string(),
            query: parse_pairs(uri.query().unwrap_or("")),
            form: parse_pairs(&body),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        };
        *self.calls.lock().unwrap().entry(route).or_insert(0) += 1;
        self.last.lock().unwrap().insert(route, recorded);

        let canned = self.canned.lock().unwrap().get(&route).cloned();
        let Some(canned) = canned else {
            return StatusCode::NOT_FOUND.into_response();
        };
        if let Some(delay) = canned.delay {
            tokio::time::sleep(delay).await;
        }
        (
            StatusCode::from_u16(canned.status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            canned.body,
        )
            .into_response()
    }
}

fn parse_pairs(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| {
                urlencoding::decode(&s.replace('+', " "))
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            };
            (decode(key), decode(value))
        })
        .collect()
}

/// A running fake SevenRooms server bound to an ephemeral loopback port.
pub struct FakeSevenRooms {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeSevenRooms {
    /// Start the fake with healthy default responses on every route.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());

        let app = Router::new()
            .route(
                "/auth",
                post(
                    |State(s): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap, body: String| async move {
                        s.handle(Route::Auth, uri, headers, body).await
                    },
                ),
            )
            .route(
                "/venues/{venue_id}/availability",
                get(
                    |State(s): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap, body: String| async move {
                        s.handle(Route::Availability, uri, headers, body).await
                    },
                ),
            )
            .route(
                "/venues/{venue_id}/book",
                put(
                    |State(s): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap, body: String| async move {
                        s.handle(Route::Book, uri, headers, body).await
                    },
                ),
            )
            .route(
                "/reservations",
                get(
                    |State(s): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap, body: String| async move {
                        s.handle(Route::Reservations, uri, headers, body).await
                    },
                ),
            )
            .route(
                "/reservations/{reservation_id}/cancel",
                post(
                    |State(s): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap, body: String| async move {
                        s.handle(Route::Cancel, uri, headers, body).await
                    },
                ),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let fake = Self { addr, state };
        fake.set(
            Route::Auth,
            200,
            serde_json::json!({ "data": { "token": FAKE_TOKEN } }),
        );
        fake.set(
            Route::Availability,
            200,
            serde_json::json!({ "data": { "availability": [] } }),
        );
        fake.set(
            Route::Book,
            200,
            serde_json::json!({ "data": { "reservation_reference_code": "CONF-1" } }),
        );
        fake.set(
            Route::Reservations,
            200,
            serde_json::json!({ "data": { "results": [] } }),
        );
        fake.set(Route::Cancel, 200, serde_json::json!({ "status": "ok" }));
        fake
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Config pointing at this fake with test credentials.
    pub fn config(&self) -> SevenRoomsConfig {
        SevenRoomsConfig::new(self.base_url(), "test-client", "test-secret")
    }

    /// Replace the JSON response for a route.
    pub fn set(&self, route: Route, status: u16, body: serde_json::Value) {
        self.set_raw(route, status, &body.to_string());
    }

    /// Replace the response for a route with an arbitrary body.
    pub fn set_raw(&self, route: Route, status: u16, body: &str) {
        let mut canned = self.state.canned.lock().unwrap();
        let delay = canned.get(&route).and_then(|c| c.delay);
        canned.insert(
            route,
            Canned {
                status,
                body: body.to_string(),
                delay,
            },
        );
    }

    /// Delay responses on a route.
    pub fn delay(&self, route: Route, delay: Duration) {
        if let Some(canned) = self.state.canned.lock().unwrap().get_mut(&route) {
            canned.delay = Some(delay);
        }
    }

    pub fn calls(&self, route: Route) -> usize {
        self.state
            .calls
            .lock()
            .unwrap()
            .get(&route)
            .copied()
            .unwrap_or(0)
    }

    pub fn last_request(&self, route: Route) -> Option<RecordedRequest> {
        self.state.last.lock().unwrap().get(&route).cloned()
    }
}
