//! Core types for Coffee Society.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod identity;
pub mod price;
pub mod rating;
pub mod screen;

pub use email::{Email, EmailError};
pub use id::*;
pub use identity::Identity;
pub use price::MenuPrice;
pub use rating::{Rating, RatingError};
pub use screen::{Screen, ScreenParams};
