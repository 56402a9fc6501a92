//! Identity derived from a session credential.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Who the client believes the current user is.
///
/// A read-only projection of the credential's claims. It is never persisted
/// on its own and stops being valid the moment the credential is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user id (the token's subject).
    pub subject_id: UserId,
    /// Name shown in greetings.
    pub display_name: String,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub fn new(subject_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            subject_id,
            display_name: display_name.into(),
        }
    }
}
