//! Bearer header, caching and data endpoints against the mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::json;

use coffee_society_client::screens::auth::{self, LoginForm};
use coffee_society_client::screens::cafes::{self, CAFE_NOT_FOUND};
use coffee_society_client::screens::{self, ScreenView};
use coffee_society_client::{ApiError, MemoryStore};
use coffee_society_core::{CafeId, Screen, ScreenParams};
use coffee_society_integration_tests::{MockBackend, issue_token};

fn login_form() -> LoginForm {
    LoginForm {
        email: "noa@example.com".to_string(),
        password: "latte".to_string(),
    }
}

#[tokio::test]
async fn test_bearer_header_follows_credential() {
    let backend = MockBackend::start().await;
    let (mut session, api) = backend.connect(Arc::new(MemoryStore::new()));

    api.list_cafes().await.unwrap();
    auth::login(&mut session, &api, &login_form()).await.unwrap();
    api.list_cafes().await.unwrap();
    auth::logout(&mut session, &api).unwrap();
    api.list_cafes().await.unwrap();

    let seen: Vec<Option<String>> = backend
        .requests_to("/api/cafes")
        .into_iter()
        .map(|request| request.authorization)
        .collect();
    let expected = format!("Bearer {}", issue_token("user-noa", "noa"));
    assert_eq!(seen, [None, Some(expected), None]);
}

#[tokio::test]
async fn test_stored_credential_sent_after_bootstrap() {
    let backend = MockBackend::start().await;
    let token = issue_token("user-dana", "dana");
    let (session, api) = backend.connect(Arc::new(MemoryStore::with_credential(token.clone())));
    assert!(session.is_authenticated());

    api.list_baristas(&CafeId::new("cafe-elma")).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/cafes/cafe-elma/baristas");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {token}").as_str())
    );
}

#[tokio::test]
async fn test_cafe_list_is_cached_until_credential_changes() {
    let backend = MockBackend::start().await;
    let (mut session, api) = backend.connect(Arc::new(MemoryStore::new()));

    let first = api.list_cafes().await.unwrap();
    let second = api.list_cafes().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(backend.requests_to("/api/cafes").len(), 1);

    backend.set_cafes(vec![json!({"_id": "cafe-new", "name": "New Kid"})]);
    auth::login(&mut session, &api, &login_form()).await.unwrap();

    let after_login = api.list_cafes().await.unwrap();
    assert_eq!(backend.requests_to("/api/cafes").len(), 2);
    assert_eq!(after_login.len(), 1);
    assert_eq!(after_login[0].id.as_str(), "cafe-new");
}

#[tokio::test]
async fn test_cafe_detail_with_baristas() {
    let backend = MockBackend::start().await;
    let (mut session, api) = backend.connect(Arc::new(MemoryStore::new()));

    session.navigate(Screen::CafeDetail, ScreenParams::cafe(CafeId::new("cafe-elma")));
    let ScreenView::CafeDetail(detail) = screens::load(&session, &api).await.unwrap() else {
        panic!("expected cafe detail");
    };
    assert_eq!(detail.cafe.name, "Elma");
    let menu = detail.cafe.menu.as_ref().unwrap();
    assert_eq!(menu.len(), 3);
    assert_eq!(menu["Flat White"].to_string(), "₪14.50");
    assert_eq!(menu["Cold Brew"].to_string(), "ask the barista");
    assert_eq!(detail.baristas.len(), 2);
    assert_eq!(detail.baristas[0].initial(), Some('Y'));
    assert!(detail.baristas[1].id.is_none());
    assert!(detail.baristas[1].specialty.is_none());
}

#[tokio::test]
async fn test_unknown_cafe_detail() {
    let backend = MockBackend::start().await;
    let (_session, api) = backend.connect(Arc::new(MemoryStore::new()));

    let err = cafes::load_cafe_detail(&api, &ScreenParams::cafe(CafeId::new("nope")))
        .await
        .unwrap_err();
    assert_eq!(err.message(), CAFE_NOT_FOUND);
    assert!(backend.requests_to("/api/cafes/nope/baristas").is_empty());
}

#[tokio::test]
async fn test_status_error_carries_server_message() {
    let backend = MockBackend::start().await;
    let (_session, api) = backend.connect(Arc::new(MemoryStore::new()));

    let err = api.list_baristas(&CafeId::new("nope")).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { .. }));
    assert_eq!(err.server_message(), Some("Cafe not found"));
    assert_eq!(err.user_message("fallback"), "Cafe not found");
}

#[tokio::test]
async fn test_cafe_id_is_escaped_in_path() {
    let backend = MockBackend::start().await;
    let (_session, api) = backend.connect(Arc::new(MemoryStore::new()));

    let _ = api.list_baristas(&CafeId::new("a/b")).await;
    assert_eq!(backend.requests()[0].path, "/api/cafes/a%2Fb/baristas");
}
