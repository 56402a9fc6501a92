//! Visit and rating commands.

use coffee_society_client::screens::cafes::load_cafe_choices;
use coffee_society_client::screens::{RatingForm, ScanForm, rating, visit};
use coffee_society_core::{CafeId, Screen, ScreenParams};

use crate::app::{App, CliError};
use crate::render;

pub async fn scan(app: &mut App, cafe_id: CafeId) -> Result<(), CliError> {
    app.session.navigate(Screen::ScanQr, ScreenParams::default());

    // Only used to name the cafe in the confirmation.
    let cafes = match load_cafe_choices(&app.api).await {
        Ok(cafes) => cafes,
        Err(e) => {
            tracing::debug!(error = %e, "Cafe names unavailable");
            Vec::new()
        }
    };

    let form = ScanForm {
        cafe_id: Some(cafe_id),
    };
    let message = visit::scan_visit(&app.session, &app.api, &cafes, &form).await?;
    render::notice(&message);
    Ok(())
}

pub async fn rate(
    app: &mut App,
    cafe_id: CafeId,
    stars: u8,
    comment: String,
) -> Result<(), CliError> {
    app.session.navigate(Screen::RateCafe, ScreenParams::default());

    let mut form = RatingForm {
        cafe_id: Some(cafe_id),
        stars,
        comment,
    };
    let message = rating::submit_rating(&app.session, &app.api, &mut form).await?;
    render::notice(&message);
    Ok(())
}
