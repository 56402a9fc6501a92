//! Screen workflows.
//!
//! Each screen owns its form state and talks to the backend through
//! [`ApiClient`]. Failures are reported as a [`ScreenError`] holding the text
//! to show inline; they never change session state. The only exception is
//! a credential that cannot be decoded after login or registration, which the
//! [`SessionController`] handles.
//!
//! [`load`] is the router: it maps the controller's current screen to the
//! data that screen renders.

pub mod auth;
pub mod cafes;
pub mod home;
pub mod rating;
pub mod visit;

use thiserror::Error;

use coffee_society_core::Screen;

use crate::api::{ApiClient, ApiError, Cafe};
use crate::session::{SessionController, SessionError};

pub use auth::{LoginForm, RegisterForm};
pub use cafes::CafeDetail;
pub use home::{CallToAction, HomeView};
pub use rating::RatingForm;
pub use visit::ScanForm;

/// Shown when a screen cannot load the cafe list.
pub const CAFES_LOAD_FAILED: &str = "Error loading coffee shops.";

/// Shown when an action needs a logged-in user.
pub const NOT_AUTHENTICATED: &str = "Error: User not authenticated.";

/// A failure to report inline on the current screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Input was rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The backend call failed.
    #[error("{message}")]
    Remote {
        /// Text to show the user.
        message: String,
        /// Underlying failure.
        #[source]
        source: ApiError,
    },

    /// The issued credential could not be used; the session was reset.
    #[error("{message}")]
    Session {
        /// Text to show the user.
        message: String,
        /// Underlying failure.
        #[source]
        source: SessionError,
    },
}

impl ScreenError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap an API failure, preferring the backend's message over `fallback`.
    pub(crate) fn remote(source: ApiError, fallback: &str) -> Self {
        tracing::warn!(error = %source, "Backend request failed");
        Self::Remote {
            message: source.user_message(fallback),
            source,
        }
    }

    /// Wrap an API failure, always showing `message`.
    pub(crate) fn remote_fixed(source: ApiError, message: &str) -> Self {
        tracing::warn!(error = %source, "Backend request failed");
        Self::Remote {
            message: message.to_string(),
            source,
        }
    }

    /// The text to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::Remote { message, .. }
            | Self::Session { message, .. } => message,
        }
    }

    /// Whether no request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Data needed to render a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    Home(HomeView),
    Login,
    Register,
    /// Sorted for display.
    CafeList(Vec<Cafe>),
    CafeDetail(CafeDetail),
    /// Cafes to pick from, in backend order.
    ScanQr(Vec<Cafe>),
    /// Cafes to pick from, in backend order.
    RateCafe(Vec<Cafe>),
}

/// Load whatever the controller's current screen needs.
///
/// # Errors
///
/// Returns the screen's load error (e.g. [`CAFES_LOAD_FAILED`]).
pub async fn load(session: &SessionController, api: &ApiClient) -> Result<ScreenView, ScreenError> {
    match session.current_screen() {
        Screen::Home => Ok(ScreenView::Home(home::home(session))),
        Screen::Login => Ok(ScreenView::Login),
        Screen::Register => Ok(ScreenView::Register),
        Screen::CafeList => cafes::load_cafe_list(api).await.map(ScreenView::CafeList),
        Screen::CafeDetail => cafes::load_cafe_detail(api, session.screen_params())
            .await
            .map(ScreenView::CafeDetail),
        Screen::ScanQr => cafes::load_cafe_choices(api).await.map(ScreenView::ScanQr),
        Screen::RateCafe => cafes::load_cafe_choices(api)
            .await
            .map(ScreenView::RateCafe),
    }
}
