//! Landing screen.

use coffee_society_core::Screen;

use crate::session::SessionController;

/// Landing page headline.
pub const WELCOME: &str = "Welcome to Haifa's coffee lovers community! Discover new coffee shops, earn points, and get special rewards.";

/// The landing page's single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: Screen,
}

/// What the landing page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub welcome: &'static str,
    /// Greeting name when logged in.
    pub display_name: Option<String>,
    pub call_to_action: CallToAction,
}

/// Build the landing page for the current session.
#[must_use]
pub fn home(session: &SessionController) -> HomeView {
    let call_to_action = if session.is_authenticated() {
        CallToAction {
            label: "View Coffee Shops",
            target: Screen::CafeList,
        }
    } else {
        CallToAction {
            label: "Join the Coffee Community",
            target: Screen::Login,
        }
    };

    HomeView {
        welcome: WELCOME,
        display_name: session.identity().map(|i| i.display_name.clone()),
        call_to_action,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::token::tests::token_for;

    #[test]
    fn test_guest_is_sent_to_login() {
        let session = SessionController::bootstrap(Arc::new(MemoryStore::new()));
        let view = home(&session);
        assert_eq!(view.call_to_action.target, Screen::Login);
        assert!(view.display_name.is_none());
    }

    #[test]
    fn test_member_is_sent_to_cafe_list() {
        let session =
            SessionController::bootstrap(Arc::new(MemoryStore::with_credential(token_for("u1", "noa"))));
        let view = home(&session);
        assert_eq!(view.call_to_action.label, "View Coffee Shops");
        assert_eq!(view.call_to_action.target, Screen::CafeList);
        assert_eq!(view.display_name.as_deref(), Some("noa"));
    }
}
