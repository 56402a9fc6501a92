//! Login, registration and logout against the mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use coffee_society_client::screens::auth::{self, LoginForm, RegisterForm};
use coffee_society_client::screens::{self, ScreenError, ScreenView};
use coffee_society_client::session::AUTH_PROCESSING_FAILED;
use coffee_society_client::{CredentialStore, FileStore, MemoryStore};
use coffee_society_core::Screen;
use coffee_society_integration_tests::{
    BROKEN_TOKEN_EMAIL, MockBackend, TAKEN_EMAIL, WRONG_PASSWORD,
};
use secrecy::ExposeSecret;

fn register_form(username: &str, email: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_string(),
        email: email.to_string(),
        password: "espresso".to_string(),
    }
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_browse_logout() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let (mut session, api) = backend.connect(store.clone());

    assert!(!session.is_authenticated());
    assert_eq!(session.current_screen(), Screen::Home);

    let outcome = auth::register(&mut session, &api, &register_form("noa", "noa@example.com"))
        .await
        .unwrap();
    assert_eq!(outcome.message, auth::REGISTER_SUCCEEDED);
    assert_eq!(outcome.identity.display_name, "noa");
    assert_eq!(outcome.identity.subject_id.as_str(), "user-noa");

    assert!(session.is_authenticated());
    assert_eq!(session.current_screen(), Screen::CafeList);
    assert_eq!(session.nav_items().len(), 4);
    assert!(store.path().exists());

    let ScreenView::CafeList(cafes) = screens::load(&session, &api).await.unwrap() else {
        panic!("expected the cafe list");
    };
    let names: Vec<&str> = cafes.iter().map(|cafe| cafe.name.as_str()).collect();
    assert_eq!(names, ["Nahat", "Elma", "Carmel Beans", "Port Roasters"]);

    auth::logout(&mut session, &api).unwrap();
    assert!(!session.is_authenticated());
    assert!(session.identity().is_none());
    assert_eq!(session.current_screen(), Screen::Home);
    assert!(session.nav_items().is_empty());
    assert!(store.get().unwrap().is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut session, api) = backend.connect(Arc::new(FileStore::new(dir.path())));
        auth::login(&mut session, &api, &login_form("dana@example.com", "latte"))
            .await
            .unwrap();
    }

    let (session, _api) = backend.connect(Arc::new(FileStore::new(dir.path())));
    assert!(session.is_authenticated());
    assert_eq!(session.current_screen(), Screen::CafeList);
    assert_eq!(session.identity().unwrap().display_name, "dana");
    assert_eq!(session.claims().unwrap().role.as_deref(), Some("user"));
}

#[tokio::test]
async fn test_login_rejected_shows_server_message() {
    let backend = MockBackend::start().await;
    let store = Arc::new(MemoryStore::new());
    let (mut session, api) = backend.connect(store.clone());

    let err = auth::login(&mut session, &api, &login_form("noa@example.com", WRONG_PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenError::Remote { .. }));
    assert_eq!(err.message(), "Invalid credentials");
    assert!(!session.is_authenticated());
    assert_eq!(session.current_screen(), Screen::Home);
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_register_conflict_shows_server_message() {
    let backend = MockBackend::start().await;
    let (mut session, api) = backend.connect(Arc::new(MemoryStore::new()));

    let err = auth::register(&mut session, &api, &register_form("noa", TAKEN_EMAIL))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Email already registered");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_undecodable_credential_is_session_fatal() {
    let backend = MockBackend::start().await;
    let store = Arc::new(MemoryStore::new());
    let (mut session, api) = backend.connect(store.clone());

    let err = auth::login(&mut session, &api, &login_form(BROKEN_TOKEN_EMAIL, "latte"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenError::Session { .. }));
    assert_eq!(err.message(), AUTH_PROCESSING_FAILED);
    assert_eq!(session.fatal_error(), Some(AUTH_PROCESSING_FAILED));
    assert!(!session.is_authenticated());
    assert!(store.get().unwrap().is_none());

    // A later successful login clears the error.
    auth::login(&mut session, &api, &login_form("noa@example.com", "latte"))
        .await
        .unwrap();
    assert!(session.fatal_error().is_none());
    assert!(session.is_authenticated());
    assert!(
        store
            .get()
            .unwrap()
            .unwrap()
            .expose_secret()
            .starts_with("eyJ")
    );
}
