//! Visit registration ("Scan QR").
//!
//! There is no camera integration: the user picks the cafe whose code they
//! scanned and the visit is posted for that cafe.

use coffee_society_core::CafeId;

use crate::api::{ApiClient, Cafe};
use crate::screens::{NOT_AUTHENTICATED, ScreenError};
use crate::session::SessionController;

pub const SELECT_CAFE_FIRST: &str = "Please select a coffee shop before scanning the QR.";
pub const SCAN_FAILED: &str = "Error processing QR scan. Please try again.";
pub const UNKNOWN_CAFE: &str = "Unknown Coffee Shop";

/// Scan form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanForm {
    pub cafe_id: Option<CafeId>,
}

/// Record a visit to the selected cafe.
///
/// `cafes` is the list shown on the screen; it is only used to name the cafe
/// in the confirmation.
///
/// # Errors
///
/// - [`NOT_AUTHENTICATED`] without a session
/// - [`SELECT_CAFE_FIRST`] without a selection
/// - the backend's message, or [`SCAN_FAILED`], if the request fails
pub async fn scan_visit(
    session: &SessionController,
    api: &ApiClient,
    cafes: &[Cafe],
    form: &ScanForm,
) -> Result<String, ScreenError> {
    if !session.is_authenticated() {
        return Err(ScreenError::validation(NOT_AUTHENTICATED));
    }
    let Some(cafe_id) = form.cafe_id.as_ref() else {
        return Err(ScreenError::validation(SELECT_CAFE_FIRST));
    };

    let reply = api
        .scan(cafe_id)
        .await
        .map_err(|e| ScreenError::remote(e, SCAN_FAILED))?;

    let cafe_name = cafes
        .iter()
        .find(|cafe| &cafe.id == cafe_id)
        .map_or(UNKNOWN_CAFE, |cafe| cafe.name.as_str());
    let message = reply.message.as_deref().unwrap_or("Visit recorded");

    tracing::info!(%cafe_id, "Visit recorded");
    Ok(format!("🎉 {message} for visiting {cafe_name}!"))
}
