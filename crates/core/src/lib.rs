//! Coffee Society Core - Shared domain types.
//!
//! This crate provides the types used across the Coffee Society components:
//! - `client` - Session controller, credential handling and the REST API client
//! - `cli` - The `coffee` terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, emails, ratings, menu prices, identity and screens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
