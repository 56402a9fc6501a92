//! Rating a cafe.

use coffee_society_core::{CafeId, Rating};

use crate::api::{ApiClient, RateRequest};
use crate::screens::{NOT_AUTHENTICATED, ScreenError};
use crate::session::SessionController;

pub const RATING_INCOMPLETE: &str = "Please select a coffee shop and provide a rating.";
pub const RATING_SUBMITTED: &str = "Rating submitted successfully!";
pub const RATING_FAILED: &str = "Error submitting rating. Please try again.";

/// Rating form state. `stars == 0` means nothing picked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingForm {
    pub cafe_id: Option<CafeId>,
    pub stars: u8,
    pub comment: String,
}

/// Submit the rating form, clearing it on success.
///
/// # Errors
///
/// - [`RATING_INCOMPLETE`] without a cafe or a star rating
/// - [`NOT_AUTHENTICATED`] without a session
/// - the backend's message, or [`RATING_FAILED`], if the request fails;
///   the form is left untouched
pub async fn submit_rating(
    session: &SessionController,
    api: &ApiClient,
    form: &mut RatingForm,
) -> Result<String, ScreenError> {
    let (Some(cafe_id), Ok(rating)) = (form.cafe_id.clone(), Rating::new(form.stars)) else {
        return Err(ScreenError::validation(RATING_INCOMPLETE));
    };
    if !session.is_authenticated() {
        return Err(ScreenError::validation(NOT_AUTHENTICATED));
    }

    let request = RateRequest {
        cafe_id,
        rating,
        comment: form.comment.trim().to_string(),
    };
    let reply = api
        .rate(&request)
        .await
        .map_err(|e| ScreenError::remote(e, RATING_FAILED))?;

    tracing::info!(cafe_id = %request.cafe_id, stars = rating.stars(), "Rating submitted");
    *form = RatingForm::default();
    Ok(reply
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| RATING_SUBMITTED.to_string()))
}
