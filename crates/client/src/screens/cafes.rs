//! Cafe directory and cafe detail screens.

use coffee_society_core::ScreenParams;

use crate::api::{ApiClient, Barista, Cafe, sort_for_directory};
use crate::screens::{CAFES_LOAD_FAILED, ScreenError};

pub const NO_CAFE_SELECTED: &str = "No coffee shop ID provided.";
pub const CAFE_NOT_FOUND: &str = "Coffee shop not found.";
pub const CAFE_DETAIL_LOAD_FAILED: &str = "Error loading coffee shop details.";

/// A cafe with its staff.
#[derive(Debug, Clone, PartialEq)]
pub struct CafeDetail {
    pub cafe: Cafe,
    pub baristas: Vec<Barista>,
}

/// Cafes for the directory, partners first then by rating.
///
/// # Errors
///
/// Returns [`CAFES_LOAD_FAILED`] if the list cannot be fetched.
pub async fn load_cafe_list(api: &ApiClient) -> Result<Vec<Cafe>, ScreenError> {
    let mut cafes = load_cafe_choices(api).await?;
    sort_for_directory(&mut cafes);
    Ok(cafes)
}

/// Cafes to pick from on the scan and rating screens, in backend order.
///
/// # Errors
///
/// Returns [`CAFES_LOAD_FAILED`] if the list cannot be fetched.
pub async fn load_cafe_choices(api: &ApiClient) -> Result<Vec<Cafe>, ScreenError> {
    api.list_cafes()
        .await
        .map_err(|e| ScreenError::remote_fixed(e, CAFES_LOAD_FAILED))
}

/// The cafe named by the screen parameters, plus its baristas.
///
/// There is no single-cafe endpoint, so the cafe is looked up in the list.
///
/// # Errors
///
/// - [`NO_CAFE_SELECTED`] when the parameters carry no cafe id
/// - [`CAFE_NOT_FOUND`] when the id is not in the list
/// - [`CAFE_DETAIL_LOAD_FAILED`] when either request fails
pub async fn load_cafe_detail(
    api: &ApiClient,
    params: &ScreenParams,
) -> Result<CafeDetail, ScreenError> {
    let Some(cafe_id) = params.cafe_id.as_ref() else {
        return Err(ScreenError::validation(NO_CAFE_SELECTED));
    };

    let cafe = api
        .list_cafes()
        .await
        .map_err(|e| ScreenError::remote_fixed(e, CAFE_DETAIL_LOAD_FAILED))?
        .into_iter()
        .find(|cafe| &cafe.id == cafe_id)
        .ok_or_else(|| ScreenError::validation(CAFE_NOT_FOUND))?;

    let baristas = api
        .list_baristas(cafe_id)
        .await
        .map_err(|e| ScreenError::remote_fixed(e, CAFE_DETAIL_LOAD_FAILED))?;

    Ok(CafeDetail { cafe, baristas })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_detail_without_cafe_id() {
        let config = ClientConfig::default()
            .with_api_base_url("http://127.0.0.1:9/api")
            .unwrap();
        let api = ApiClient::new(&config, Arc::new(MemoryStore::new())).unwrap();

        let err = load_cafe_detail(&api, &ScreenParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.message(), NO_CAFE_SELECTED);
    }

    #[tokio::test]
    async fn test_list_failure_message() {
        let config = ClientConfig::default()
            .with_api_base_url("http://127.0.0.1:9/api")
            .unwrap();
        let api = ApiClient::new(&config, Arc::new(MemoryStore::new())).unwrap();

        let err = load_cafe_list(&api).await.unwrap_err();
        assert_eq!(err.message(), CAFES_LOAD_FAILED);
    }
}
