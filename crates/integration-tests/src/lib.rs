//! Integration tests for the Coffee Society client.
//!
//! The tests drive [`SessionController`], [`ApiClient`] and the screen
//! workflows against [`MockBackend`], an in-process `axum` server that speaks
//! the backend's REST API on an ephemeral port. No external services are
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coffee-society-integration-tests
//! ```
//!
//! # Mock backend behavior
//!
//! - `POST /api/auth/register` - 409 for `taken@example.com`, otherwise a credential
//! - `POST /api/auth/login` - 401 for the password `wrong`; `broken@example.com`
//!   receives a credential that cannot be decoded
//! - `POST /api/user/scan`, `POST /api/user/rate` - 401 without a bearer
//!   header, 404 for unknown cafes
//! - `GET /api/cafes`, `GET /api/cafes/{cafe_id}/baristas` - fixture data
//!
//! Every request is recorded with its `Authorization` header.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use coffee_society_client::{ApiClient, ClientConfig, CredentialStore, SessionController};

/// Email the mock backend treats as already registered.
pub const TAKEN_EMAIL: &str = "taken@example.com";
/// Email the mock backend answers with an undecodable credential.
pub const BROKEN_TOKEN_EMAIL: &str = "broken@example.com";
/// Password the mock backend always rejects.
pub const WRONG_PASSWORD: &str = "wrong";

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    cafes: Mutex<Vec<Value>>,
}

impl MockState {
    fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        lock(&self.requests).push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            authorization,
            body,
        });
    }

    fn knows_cafe(&self, cafe_id: &str) -> bool {
        lock(&self.cafes).iter().any(|cafe| cafe["_id"] == cafe_id)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// In-process stand-in for the Coffee Society backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Start the server with the default cafe fixtures.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        *lock(&state.cafes) = default_cafes();

        let api = Router::new()
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route("/user/scan", post(scan))
            .route("/user/rate", post(rate))
            .route("/cafes", get(cafes))
            .route("/cafes/{cafe_id}/baristas", get(baristas))
            .with_state(state.clone());
        let app = Router::new().nest("/api", api);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL to hand to [`ClientConfig`].
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// A controller and API client sharing `store`, pointed at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    pub fn connect(&self, store: Arc<dyn CredentialStore>) -> (SessionController, ApiClient) {
        let config = ClientConfig::default()
            .with_api_base_url(&self.base_url())
            .expect("Mock backend URL is valid");
        let api = ApiClient::new(&config, store.clone()).expect("Failed to build API client");
        (SessionController::bootstrap(store), api)
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests received for `path` (e.g. `/api/cafes`).
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    /// Replace the cafe fixtures.
    pub fn set_cafes(&self, cafes: Vec<Value>) {
        *lock(&self.state.cafes) = cafes;
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Build an unsigned-but-well-formed credential carrying `id` and `username`.
#[must_use]
pub fn issue_token(id: &str, username: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string());
    let claims = URL_SAFE_NO_PAD.encode(
        json!({
            "id": id,
            "username": username,
            "role": "user",
            "iat": 1_760_000_000,
            "exp": 1_760_086_400,
        })
        .to_string(),
    );
    let signature = URL_SAFE_NO_PAD.encode(b"mock-signature");
    format!("{header}.{claims}.{signature}")
}

/// Cafe fixtures in backend order: the partner is neither first nor
/// highest rated, and one cafe has no rating.
#[must_use]
pub fn default_cafes() -> Vec<Value> {
    vec![
        json!({
            "_id": "cafe-elma",
            "name": "Elma",
            "address": "Masada St 12, Haifa",
            "description": "Third-wave espresso bar",
            "rating": 4.8,
            "isCommunityPartner": false,
            "menu": {"Espresso": "9.00", "Flat White": "14.50", "Cold Brew": "ask the barista"}
        }),
        json!({
            "_id": "cafe-nahat",
            "name": "Nahat",
            "address": "Moriah Blvd 80, Haifa",
            "rating": 4.2,
            "isCommunityPartner": true
        }),
        json!({
            "_id": "cafe-port",
            "name": "Port Roasters",
            "isCommunityPartner": false
        }),
        json!({
            "_id": "cafe-carmel",
            "name": "Carmel Beans",
            "imageUrl": "https://img.example.com/carmel.jpg",
            "rating": 4.5
        }),
    ]
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer ") && value.len() > "Bearer ".len())
}

async fn register(
    State(state): State<Arc<MockState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(Method::POST, &uri, &headers, body.clone());

    let email = body["email"].as_str().unwrap_or_default();
    if email == TAKEN_EMAIL {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    let username = body["username"].as_str().unwrap_or_default();
    let id = format!("user-{username}");
    (
        StatusCode::CREATED,
        Json(json!({
            "token": issue_token(&id, username),
            "user": {"_id": id, "username": username, "email": email}
        })),
    )
        .into_response()
}

async fn login(
    State(state): State<Arc<MockState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(Method::POST, &uri, &headers, body.clone());

    if body["password"] == WRONG_PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let email = body["email"].as_str().unwrap_or_default();
    if email == BROKEN_TOKEN_EMAIL {
        return Json(json!({ "token": "not-a-credential" })).into_response();
    }
    let username = email.split('@').next().unwrap_or_default();
    let id = format!("user-{username}");
    Json(json!({
        "token": issue_token(&id, username),
        "user": {"_id": id, "username": username, "email": email}
    }))
    .into_response()
}

async fn scan(
    State(state): State<Arc<MockState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(Method::POST, &uri, &headers, body.clone());

    if !is_authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "No token, authorization denied");
    }
    let cafe_id = body["cafeId"].as_str().unwrap_or_default();
    if !state.knows_cafe(cafe_id) {
        return error(StatusCode::NOT_FOUND, "Cafe not found");
    }
    Json(json!({ "message": "You earned 10 points" })).into_response()
}

async fn rate(
    State(state): State<Arc<MockState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(Method::POST, &uri, &headers, body.clone());

    if !is_authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "No token, authorization denied");
    }
    let cafe_id = body["cafeId"].as_str().unwrap_or_default();
    if !state.knows_cafe(cafe_id) {
        return error(StatusCode::NOT_FOUND, "Cafe not found");
    }
    if !(1..=5).contains(&body["rating"].as_u64().unwrap_or_default()) {
        return error(StatusCode::BAD_REQUEST, "Rating must be between 1 and 5");
    }
    Json(json!({ "message": "Thanks for rating!" })).into_response()
}

async fn cafes(State(state): State<Arc<MockState>>, OriginalUri(uri): OriginalUri, headers: HeaderMap) -> Response {
    state.record(Method::GET, &uri, &headers, Value::Null);
    Json(Value::Array(lock(&state.cafes).clone())).into_response()
}

async fn baristas(
    State(state): State<Arc<MockState>>,
    Path(cafe_id): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    state.record(Method::GET, &uri, &headers, Value::Null);

    if !state.knows_cafe(&cafe_id) {
        return error(StatusCode::NOT_FOUND, "Cafe not found");
    }
    Json(json!([
        {"_id": format!("{cafe_id}-b1"), "name": "yael", "specialty": "Latte art", "rating": 4.9},
        {"name": "Omer"}
    ]))
    .into_response()
}
