//! Session credential decoding.
//!
//! The backend issues a JWT on login/registration. The client reads the
//! claims to learn who is logged in, but never verifies the signature: the
//! token is trusted on read, and the backend re-validates it on every request
//! that carries it. Do not add verification here; the signing key is not
//! available client-side.
//!
//! # Token Layout
//!
//! ```text
//! base64url(header) "." base64url(claims) "." signature
//! ```
//!
//! Claims used:
//! - `id` (or `sub`) - the user id
//! - `username` (or `name`) - display name
//! - `role`, `iat`, `exp` - optional, informational only

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use coffee_society_core::{Identity, UserId};

/// base64url with optional padding, as emitted by JWT libraries.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Some issuers use the standard alphabet; accept it as a fallback.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Which part of the token failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Claims,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Claims => write!(f, "claims"),
        }
    }
}

/// Errors that can occur while decoding a credential.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The credential is empty or only whitespace.
    #[error("credential is empty")]
    Empty,

    /// The credential does not have the `header.claims.signature` shape.
    #[error("malformed credential: expected 3 segments, found {0}")]
    Malformed(usize),

    /// The header or claims segment is empty.
    #[error("malformed credential: empty {0} segment")]
    EmptySegment(Segment),

    /// A segment is not valid base64url.
    #[error("invalid base64 in {0} segment")]
    Base64(Segment, #[source] base64::DecodeError),

    /// A segment is not a JSON object.
    #[error("invalid JSON in {0} segment: {1}")]
    Json(Segment, #[source] serde_json::Error),

    /// A required claim is absent or blank.
    #[error("missing claim: {0}")]
    MissingClaim(&'static str),
}

/// Claims carried by a session credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// User id.
    #[serde(alias = "sub")]
    pub id: Option<String>,
    /// Display name.
    #[serde(alias = "name")]
    pub username: Option<String>,
    /// Role assigned by the backend (e.g. `user`, `partner`).
    pub role: Option<String>,
    /// Issued-at, unix seconds.
    pub iat: Option<i64>,
    /// Expiry, unix seconds.
    pub exp: Option<i64>,
}

impl Claims {
    /// When the token was issued, if the claim is present.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// When the token expires, if the claim is present.
    ///
    /// Informational only; the session never acts on it.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Project the claims onto an [`Identity`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingClaim`] if the user id or display name
    /// is absent or blank.
    pub fn identity(&self) -> Result<Identity, DecodeError> {
        let subject = non_blank(self.id.as_deref()).ok_or(DecodeError::MissingClaim("id"))?;
        let name =
            non_blank(self.username.as_deref()).ok_or(DecodeError::MissingClaim("username"))?;
        Ok(Identity::new(UserId::new(subject), name))
    }
}

/// Decode a credential into its [`Identity`].
///
/// Pure; performs no signature check.
///
/// # Errors
///
/// Returns a [`DecodeError`] for any input that is not a well-formed token
/// carrying a user id and display name.
pub fn decode(credential: &str) -> Result<Identity, DecodeError> {
    decode_claims(credential)?.identity()
}

/// Decode a credential into its raw [`Claims`].
///
/// # Errors
///
/// Returns a [`DecodeError`] if the token structure, encoding, or JSON is
/// invalid. Missing claims are not checked here.
pub fn decode_claims(credential: &str) -> Result<Claims, DecodeError> {
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(DecodeError::Empty);
    }

    let segments: Vec<&str> = credential.split('.').collect();
    let [header, claims, _signature] = segments.as_slice() else {
        return Err(DecodeError::Malformed(segments.len()));
    };

    // The header is only checked for shape.
    let _: serde_json::Map<String, serde_json::Value> = decode_segment(header, Segment::Header)?;
    decode_segment(claims, Segment::Claims)
}

fn decode_segment<T: serde::de::DeserializeOwned>(
    segment: &str,
    which: Segment,
) -> Result<T, DecodeError> {
    if segment.is_empty() {
        return Err(DecodeError::EmptySegment(which));
    }
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .or_else(|_| STANDARD_LENIENT.decode(segment))
        .map_err(|e| DecodeError::Base64(which, e))?;
    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(which, e))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
