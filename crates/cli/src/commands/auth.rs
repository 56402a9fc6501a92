//! Account commands.

use coffee_society_client::screens::auth::{self, LoginForm, RegisterForm};

use crate::app::{App, CliError};
use crate::render;

pub async fn register(
    app: &mut App,
    username: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let form = RegisterForm {
        username,
        email,
        password,
    };
    let outcome = auth::register(&mut app.session, &app.api, &form).await?;
    tracing::info!(user = %outcome.identity.subject_id, "Registered");
    render::notice(outcome.message);
    Ok(())
}

pub async fn login(app: &mut App, email: String, password: String) -> Result<(), CliError> {
    let form = LoginForm { email, password };
    let outcome = auth::login(&mut app.session, &app.api, &form).await?;
    render::notice(outcome.message);
    Ok(())
}

/// The session is logged out even when the credential file could not be
/// removed; that failure is still reported.
pub fn logout(app: &mut App) -> Result<(), CliError> {
    auth::logout(&mut app.session, &app.api)?;
    Ok(())
}

pub fn whoami(app: &App) {
    render::whoami(&app.session);
}
