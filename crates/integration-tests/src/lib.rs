//! Integration tests for KloudCart.
//!
//! The library half of this crate hosts [`MockApi`], an in-process `axum`
//! mock of the remote shop API. Each test spawns its own instance on an
//! ephemeral port and points a `Shop` at it, so tests are isolated and need
//! no running backend.
//!
//! # Test Categories
//!
//! - `auth_flow` - register / login / logout scenarios
//! - `storefront_flow` - inventory refresh and checkout scenarios

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use url::Url;

use kloudcart_client::config::ClientConfig;

/// A canned response for one endpoint.
#[derive(Debug, Clone)]
pub struct Planned {
    pub status: StatusCode,
    pub body: Value,
}

impl Planned {
    fn respond(&self) -> Response {
        (self.status, Json(self.body.clone())).into_response()
    }
}

/// An order captured by the mock.
#[derive(Debug, Clone)]
pub struct ReceivedOrder {
    /// Token presented in the `Authorization: Bearer` header, if any.
    pub bearer: Option<String>,
    /// Raw JSON request body.
    pub body: Value,
}

/// Shared mock state, inspectable and reconfigurable from tests.
pub struct ApiState {
    vegetables: Mutex<Value>,
    fail_vegetables: AtomicBool,
    vegetable_hits: AtomicUsize,
    vegetable_delay: Mutex<Option<Duration>>,
    register: Mutex<Planned>,
    login: Mutex<Planned>,
    order: Mutex<Planned>,
    order_delay: Mutex<Option<Duration>>,
    orders: Mutex<Vec<ReceivedOrder>>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            vegetables: Mutex::new(json!([])),
            fail_vegetables: AtomicBool::new(false),
            vegetable_hits: AtomicUsize::new(0),
            vegetable_delay: Mutex::new(None),
            register: Mutex::new(Planned {
                status: StatusCode::CREATED,
                body: json!({}),
            }),
            login: Mutex::new(Planned {
                status: StatusCode::OK,
                body: json!({"access_token": "tok123"}),
            }),
            order: Mutex::new(Planned {
                status: StatusCode::OK,
                body: json!({}),
            }),
            order_delay: Mutex::new(None),
            orders: Mutex::new(Vec::new()),
        }
    }
}

/// An in-process mock of the KloudCart shop API.
pub struct MockApi {
    state: Arc<ApiState>,
    addr: SocketAddr,
}

impl MockApi {
    /// Bind an ephemeral port and serve the mock in a background task.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound (test environment error).
    pub async fn spawn() -> Self {
        let state = Arc::new(ApiState::default());

        let router = Router::new()
            .route("/vegetables", get(list_vegetables))
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route("/orders", post(orders))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock API");
        });

        Self { state, addr }
    }

    /// Client configuration pointing at this mock.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let url = Url::parse(&format!("http://{}", self.addr)).expect("mock url");
        ClientConfig::new(url)
    }

    /// Replace the catalog served by `GET /vegetables`.
    pub fn set_vegetables(&self, vegetables: Value) {
        *self.state.vegetables.lock().expect("lock") = vegetables;
    }

    /// Make `GET /vegetables` answer 500 until reset.
    pub fn fail_vegetables(&self, fail: bool) {
        self.state.fail_vegetables.store(fail, Ordering::SeqCst);
    }

    /// Number of `GET /vegetables` requests seen so far.
    #[must_use]
    pub fn vegetable_hits(&self) -> usize {
        self.state.vegetable_hits.load(Ordering::SeqCst)
    }

    /// Delay `GET /vegetables` responses, e.g. to keep a fetch in flight.
    pub fn delay_vegetables(&self, delay: Duration) {
        *self.state.vegetable_delay.lock().expect("lock") = Some(delay);
    }

    /// Plan the response for `POST /auth/register`.
    pub fn plan_register(&self, status: StatusCode, body: Value) {
        *self.state.register.lock().expect("lock") = Planned { status, body };
    }

    /// Plan the response for `POST /auth/login`.
    pub fn plan_login(&self, status: StatusCode, body: Value) {
        *self.state.login.lock().expect("lock") = Planned { status, body };
    }

    /// Plan the response for `POST /orders`.
    pub fn plan_order(&self, status: StatusCode, body: Value) {
        *self.state.order.lock().expect("lock") = Planned { status, body };
    }

    /// Delay `POST /orders` responses, e.g. to widen overlap windows.
    pub fn delay_orders(&self, delay: Duration) {
        *self.state.order_delay.lock().expect("lock") = Some(delay);
    }

    /// Orders captured so far, oldest first.
    #[must_use]
    pub fn received_orders(&self) -> Vec<ReceivedOrder> {
        self.state.orders.lock().expect("lock").clone()
    }
}

async fn list_vegetables(State(state): State<Arc<ApiState>>) -> Response {
    state.vegetable_hits.fetch_add(1, Ordering::SeqCst);

    let delay = *state.vegetable_delay.lock().expect("lock");
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if state.fail_vegetables.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"msg": "catalog unavailable"})),
        )
            .into_response();
    }

    Json(state.vegetables.lock().expect("lock").clone()).into_response()
}

async fn register(State(state): State<Arc<ApiState>>, Json(_body): Json<Value>) -> Response {
    state.register.lock().expect("lock").respond()
}

async fn login(State(state): State<Arc<ApiState>>, Json(_body): Json<Value>) -> Response {
    state.login.lock().expect("lock").respond()
}

async fn orders(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let delay = *state.order_delay.lock().expect("lock");
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    state
        .orders
        .lock()
        .expect("lock")
        .push(ReceivedOrder { bearer, body });

    state.order.lock().expect("lock").respond()
}
