//! Coffee Society Client - session state, credentials and backend access.
//!
//! This crate drives the Coffee Society Haifa client from outside any UI
//! toolkit. A front end (the `coffee` CLI, or anything else) owns one
//! [`SessionController`] and one [`ApiClient`] sharing a [`CredentialStore`],
//! and calls into [`screens`] to run each screen's workflow.
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration
//! - [`storage`] - Persistent credential slot (file or in-memory)
//! - [`token`] - Unverified decoding of the bearer credential
//! - [`session`] - Authentication state and screen navigation
//! - [`api`] - REST client for the backend
//! - [`screens`] - Per-screen workflows and their user-facing messages
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use coffee_society_client::{ApiClient, ClientConfig, FileStore, SessionController, screens};
//!
//! let config = ClientConfig::from_env()?;
//! let store = Arc::new(FileStore::new(&config.data_dir));
//! let api = ApiClient::new(&config, store.clone())?;
//! let mut session = SessionController::bootstrap(store);
//! let view = screens::load(&session, &api).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod screens;
pub mod session;
pub mod storage;
pub mod token;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError};
pub use screens::{ScreenError, ScreenView};
pub use session::{SessionController, SessionError, SessionView};
pub use storage::{CredentialStore, FileStore, MemoryStore, StorageError};
pub use token::{Claims, DecodeError};
