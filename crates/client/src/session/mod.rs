//! Session and navigation controller.
//!
//! [`SessionController`] is the single writer of "who is logged in" and
//! "which screen is shown". Screens read it through [`SessionView`] snapshots
//! or the accessor methods and ask it to change state through
//! [`SessionController::navigate`], [`SessionController::on_auth_success`]
//! and [`SessionController::logout`].
//!
//! # States
//!
//! ```text
//!                 bootstrap (no / bad credential)
//!                ┌─────────────────────────────┐
//!                ▼                             │
//!        Unauthenticated ── on_auth_success ──► Authenticated(identity)
//!                ▲                             │
//!                └────────── logout ───────────┘
//! ```
//!
//! `authenticated` is true iff an identity is present iff the last decode of
//! the stored credential succeeded. Credential expiry is not re-checked after
//! bootstrap, and navigation performs no authorization check: screens
//! cooperate by consulting [`SessionController::is_authenticated`].

mod navigation;

pub use navigation::{NAV_BAR, NavItem, Navigation};

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use coffee_society_core::{Identity, Screen, ScreenParams};

use crate::storage::{CredentialStore, StorageError};
use crate::token::{self, Claims, DecodeError};

/// Message shown when a freshly issued credential cannot be used.
pub const AUTH_PROCESSING_FAILED: &str =
    "Failed to process user data after login. Please try again.";

/// Errors surfaced by session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The credential could not be decoded.
    #[error("credential rejected: {0}")]
    Credential(#[from] DecodeError),

    /// The credential store failed.
    #[error("credential storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AuthState {
    Unauthenticated,
    Authenticated { identity: Identity, claims: Claims },
}

/// Read-only snapshot of the controller, handed to screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Current identity, present iff authenticated.
    pub identity: Option<Identity>,
    /// Whether a decoded credential is held.
    pub authenticated: bool,
    /// Active screen.
    pub current_screen: Screen,
    /// Parameters of the active screen.
    pub screen_params: ScreenParams,
    /// Session-fatal error from the last authentication attempt.
    pub fatal_error: Option<String>,
}

/// Owner of the session and navigation state.
pub struct SessionController {
    store: Arc<dyn CredentialStore>,
    auth: AuthState,
    navigation: Navigation,
    fatal_error: Option<String>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("auth", &self.auth)
            .field("navigation", &self.navigation)
            .field("fatal_error", &self.fatal_error)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Start a session from whatever credential `store` holds.
    ///
    /// - no credential: unauthenticated, on `home`
    /// - decodable credential: authenticated, on `cafeList`
    /// - undecodable credential: removed from the store, unauthenticated, on `home`
    ///
    /// A store that cannot be read counts as holding no credential. A stored
    /// value that is not text is removed like an undecodable one.
    pub fn bootstrap(store: Arc<dyn CredentialStore>) -> Self {
        let mut controller = Self {
            store,
            auth: AuthState::Unauthenticated,
            navigation: Navigation::default(),
            fatal_error: None,
        };

        let stored = match controller.store.get() {
            Ok(stored) => stored,
            Err(e @ StorageError::NotUtf8(_)) => {
                tracing::warn!(error = %e, "Stored credential is unreadable, discarding it");
                controller.discard_credential();
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored credential");
                None
            }
        };

        let Some(credential) = stored else {
            tracing::debug!("No stored credential, starting unauthenticated");
            controller.navigation.go(Screen::Home, ScreenParams::default());
            return controller;
        };

        match decode(&credential) {
            Ok((identity, claims)) => {
                tracing::info!(user_id = %identity.subject_id, "Session restored from stored credential");
                controller.auth = AuthState::Authenticated { identity, claims };
                controller
                    .navigation
                    .go(Screen::CafeList, ScreenParams::default());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential is invalid, discarding it");
                controller.discard_credential();
                controller.navigation.go(Screen::Home, ScreenParams::default());
            }
        }

        controller
    }

    /// Accept a credential issued by a successful login or registration.
    ///
    /// The credential is persisted (replacing any previous one) and decoded.
    /// On success the session becomes authenticated and moves to `cafeList`.
    /// On failure the credential is discarded, the session is unauthenticated,
    /// and [`AUTH_PROCESSING_FAILED`] is recorded as the fatal error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the credential cannot be persisted
    /// and `SessionError::Credential` if it cannot be decoded.
    pub fn on_auth_success(&mut self, credential: SecretString) -> Result<Identity, SessionError> {
        let outcome = self
            .store
            .set(&credential)
            .map_err(SessionError::from)
            .and_then(|()| decode(&credential).map_err(SessionError::from));

        match outcome {
            Ok((identity, claims)) => {
                tracing::info!(user_id = %identity.subject_id, "Authenticated");
                self.auth = AuthState::Authenticated {
                    identity: identity.clone(),
                    claims,
                };
                self.fatal_error = None;
                self.navigation
                    .go(Screen::CafeList, ScreenParams::default());
                Ok(identity)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to process credential after authentication");
                self.discard_credential();
                self.auth = AuthState::Unauthenticated;
                self.fatal_error = Some(AUTH_PROCESSING_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// End the session locally.
    ///
    /// Always leaves the controller unauthenticated on `home`. The backend is
    /// not contacted and the credential is not revoked server-side.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the stored credential could not be
    /// removed; the in-memory session is logged out regardless.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let result = self.store.clear().map_err(SessionError::from);
        self.auth = AuthState::Unauthenticated;
        self.navigation.go(Screen::Home, ScreenParams::default());
        match &result {
            Ok(()) => tracing::info!("Logged out"),
            Err(e) => tracing::error!(error = %e, "Logged out, but stored credential remains"),
        }
        result
    }

    /// Show `screen`. Parameters survive only for `cafeDetail`.
    pub fn navigate(&mut self, screen: Screen, params: ScreenParams) {
        tracing::debug!(%screen, ?params, "Navigate");
        self.navigation.go(screen, params);
    }

    /// The current identity, if authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match &self.auth {
            AuthState::Authenticated { identity, .. } => Some(identity),
            AuthState::Unauthenticated => None,
        }
    }

    /// Raw claims of the current credential, if authenticated.
    #[must_use]
    pub const fn claims(&self) -> Option<&Claims> {
        match &self.auth {
            AuthState::Authenticated { claims, .. } => Some(claims),
            AuthState::Unauthenticated => None,
        }
    }

    /// Whether a decoded credential is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated { .. })
    }

    /// The active screen.
    #[must_use]
    pub const fn current_screen(&self) -> Screen {
        self.navigation.screen()
    }

    /// Parameters of the active screen.
    #[must_use]
    pub const fn screen_params(&self) -> &ScreenParams {
        self.navigation.params()
    }

    /// Session-fatal error from the last authentication attempt.
    #[must_use]
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal_error.as_deref()
    }

    /// Navigation bar entries; empty unless authenticated.
    #[must_use]
    pub fn nav_items(&self) -> &'static [NavItem] {
        if self.is_authenticated() {
            &NAV_BAR
        } else {
            &[]
        }
    }

    /// Snapshot for read-only consumers.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            identity: self.identity().cloned(),
            authenticated: self.is_authenticated(),
            current_screen: self.current_screen(),
            screen_params: self.screen_params().clone(),
            fatal_error: self.fatal_error.clone(),
        }
    }

    /// The credential store shared with the API client.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    fn discard_credential(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to discard credential");
        }
    }
}

fn decode(credential: &SecretString) -> Result<(Identity, Claims), DecodeError> {
    let claims = token::decode_claims(credential.expose_secret())?;
    let identity = claims.identity()?;
    Ok((identity, claims))
}
