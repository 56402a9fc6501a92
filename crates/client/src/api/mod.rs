//! Coffee Society REST API client.
//!
//! # Endpoints
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | POST | `/auth/register` | create account, returns `{token, user}` |
//! | POST | `/auth/login` | authenticate, returns `{token, user}` |
//! | POST | `/user/scan` | record a visit `{cafeId}` |
//! | POST | `/user/rate` | submit `{cafeId, rating, comment}` |
//! | GET | `/cafes` | list coffee shops |
//! | GET | `/cafes/{cafeId}/baristas` | list a shop's baristas |
//!
//! Every request carries `Authorization: Bearer <credential>` when the shared
//! [`CredentialStore`] holds one. The cafe list is cached in memory via
//! `moka`; call [`ApiClient::invalidate_cache`] whenever the credential changes.
//!
//! # Example
//!
//! ```rust,ignore
//! use coffee_society_client::api::ApiClient;
//!
//! let api = ApiClient::new(&config, store.clone())?;
//! let cafes = api.list_cafes().await?;
//! let baristas = api.list_baristas(&cafes[0].id).await?;
//! ```

pub mod types;

pub use types::*;

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use coffee_society_core::CafeId;

use crate::config::ClientConfig;
use crate::storage::CredentialStore;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API returned {status}: {}", .message.as_deref().unwrap_or("(no message)"))]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// `message` field of the JSON error body, if any.
        message: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Message supplied by the backend, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the backend's message, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Whether the backend rejected the credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                ..
            }
        )
    }
}

/// Cache key for API responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Cafes,
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Coffee Society backend.
///
/// Cheap to clone; clones share the HTTP connection pool, cache and
/// credential store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    cafes: Cache<CacheKey, Arc<Vec<Cafe>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.api_base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("coffee-society/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cafes = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.cafe_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                config: config.clone(),
                store,
                cafes,
            }),
        })
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.config.api_base_url
    }

    /// Drop cached responses. Call after login, registration and logout.
    pub fn invalidate_cache(&self) {
        self.inner.cafes.invalidate_all();
        debug!("API cache invalidated");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip_all, fields(username = request.username))]
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post("auth/register", request).await
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post("auth/login", request).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a visit to a cafe.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn scan(&self, cafe_id: &CafeId) -> Result<MessageResponse, ApiError> {
        self.post("user/scan", &ScanRequest { cafe_id }).await
    }

    /// Rate a cafe.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn rate(&self, request: &RateRequest) -> Result<MessageResponse, ApiError> {
        self.post("user/rate", request).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────

    /// List all cafes, in backend order. Served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a list
    /// of cafes.
    #[instrument(skip(self))]
    pub async fn list_cafes(&self) -> Result<Vec<Cafe>, ApiError> {
        if let Some(cached) = self.inner.cafes.get(&CacheKey::Cafes).await {
            debug!(count = cached.len(), "Cafe list served from cache");
            return Ok(cached.as_ref().clone());
        }

        let cafes: Vec<Cafe> = self.get("cafes").await?;
        debug!(count = cafes.len(), "Fetched cafe list");
        self.inner
            .cafes
            .insert(CacheKey::Cafes, Arc::new(cafes.clone()))
            .await;
        Ok(cafes)
    }

    /// List the baristas of a cafe.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a list
    /// of baristas.
    #[instrument(skip(self))]
    pub async fn list_baristas(&self, cafe_id: &CafeId) -> Result<Vec<Barista>, ApiError> {
        let mut url = self.inner.config.endpoint("cafes")?;
        // Push as a segment so ids are percent-encoded.
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(cafe_id.as_str())
            .push("baristas");
        self.send(self.inner.client.get(url)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.inner.config.endpoint(path)?;
        self.send(self.inner.client.get(url)).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.inner.config.endpoint(path)?;
        self.send(self.inner.client.post(url).json(body)).await
    }

    /// Attach the bearer credential, send, and decode the JSON reply.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match self.inner.store.get() {
            Ok(Some(credential)) => request.bearer_auth(credential.expose_secret()),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read credential, sending unauthenticated");
                request
            }
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<MessageResponse>(&body)
                .ok()
                .and_then(|reply| reply.message);
            debug!(%status, ?message, "API request rejected");
            return Err(ApiError::Status { status, message });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
