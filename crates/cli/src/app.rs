//! Client state shared by every command.

use std::sync::Arc;

use thiserror::Error;

use coffee_society_client::{
    ApiClient, ApiError, ClientConfig, ConfigError, FileStore, ScreenError, SessionController,
    SessionError,
};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not create API client: {0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Screen(#[from] ScreenError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The session controller and API client, sharing one credential file.
pub struct App {
    pub session: SessionController,
    pub api: ApiClient,
}

impl App {
    /// Build the app from `COFFEE_*` environment variables.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        Self::new(&config)
    }

    pub fn new(config: &ClientConfig) -> Result<Self, CliError> {
        let store = Arc::new(FileStore::new(config.data_dir.clone()));
        let api = ApiClient::new(config, store.clone())?;
        let session = SessionController::bootstrap(store);

        tracing::debug!(
            base_url = %config.api_base_url,
            authenticated = session.is_authenticated(),
            screen = %session.current_screen(),
            "Session restored"
        );

        Ok(Self { session, api })
    }
}
