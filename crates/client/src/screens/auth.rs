//! Login, registration and logout.

use secrecy::SecretString;

use coffee_society_core::{Email, Identity};

use crate::api::{ApiClient, LoginRequest, RegisterRequest};
use crate::screens::ScreenError;
use crate::session::{AUTH_PROCESSING_FAILED, SessionController, SessionError};

pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_SUCCEEDED: &str = "Registration successful!";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Login form fields.
#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form fields.
#[derive(Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub message: &'static str,
    pub identity: Identity,
}

/// Submit the login form.
///
/// On success the session is authenticated and on `cafeList`.
///
/// # Errors
///
/// - `ScreenError::Validation` for a bad email or blank password
/// - `ScreenError::Remote` if the backend refuses (server message or [`LOGIN_FAILED`])
/// - `ScreenError::Session` if the issued credential is unusable
pub async fn login(
    session: &mut SessionController,
    api: &ApiClient,
    form: &LoginForm,
) -> Result<AuthOutcome, ScreenError> {
    let email = parse_email(&form.email)?;
    require("Password", &form.password)?;

    let response = api
        .login(&LoginRequest {
            email: &email,
            password: &form.password,
        })
        .await
        .map_err(|e| ScreenError::remote(e, LOGIN_FAILED))?;

    let identity = accept_credential(session, api, response.token)?;
    Ok(AuthOutcome {
        message: LOGIN_SUCCEEDED,
        identity,
    })
}

/// Submit the registration form.
///
/// A successful registration logs the new user in.
///
/// # Errors
///
/// - `ScreenError::Validation` for a blank field or bad email
/// - `ScreenError::Remote` if the backend refuses (server message or [`REGISTER_FAILED`])
/// - `ScreenError::Session` if the issued credential is unusable
pub async fn register(
    session: &mut SessionController,
    api: &ApiClient,
    form: &RegisterForm,
) -> Result<AuthOutcome, ScreenError> {
    let username = form.username.trim();
    require("Username", username)?;
    let email = parse_email(&form.email)?;
    require("Password", &form.password)?;

    let response = api
        .register(&RegisterRequest {
            username,
            email: &email,
            password: &form.password,
        })
        .await
        .map_err(|e| ScreenError::remote(e, REGISTER_FAILED))?;

    let identity = accept_credential(session, api, response.token)?;
    Ok(AuthOutcome {
        message: REGISTER_SUCCEEDED,
        identity,
    })
}

/// Log out locally and drop cached data.
///
/// # Errors
///
/// Returns `SessionError::Storage` if the stored credential could not be
/// removed; the session is logged out either way.
pub fn logout(session: &mut SessionController, api: &ApiClient) -> Result<(), SessionError> {
    api.invalidate_cache();
    session.logout()
}

fn accept_credential(
    session: &mut SessionController,
    api: &ApiClient,
    token: String,
) -> Result<Identity, ScreenError> {
    api.invalidate_cache();
    session
        .on_auth_success(SecretString::from(token))
        .map_err(|source| ScreenError::Session {
            message: session
                .fatal_error()
                .unwrap_or(AUTH_PROCESSING_FAILED)
                .to_string(),
            source,
        })
}

fn parse_email(raw: &str) -> Result<Email, ScreenError> {
    Email::parse(raw).map_err(|e| ScreenError::validation(format!("Invalid email: {e}")))
}

fn require(field: &str, value: &str) -> Result<(), ScreenError> {
    if value.trim().is_empty() {
        return Err(ScreenError::validation(format!("{field} is required.")));
    }
    Ok(())
}
