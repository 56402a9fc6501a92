//! Navigation state: which screen is shown and with what parameters.

use coffee_society_core::{Screen, ScreenParams};

/// Current screen plus its parameters.
///
/// Never persisted; every process starts from the default (`home`, no
/// parameters) and bootstrap moves it from there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    screen: Screen,
    params: ScreenParams,
}

impl Navigation {
    /// The active screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Parameters of the active screen.
    #[must_use]
    pub const fn params(&self) -> &ScreenParams {
        &self.params
    }

    /// Switch screens.
    ///
    /// Parameters are kept only for [`Screen::CafeDetail`] with a cafe id;
    /// anything else leaves them empty.
    pub(crate) fn go(&mut self, screen: Screen, params: ScreenParams) {
        self.screen = screen;
        self.params = match (screen, params.cafe_id) {
            (Screen::CafeDetail, Some(cafe_id)) => ScreenParams::cafe(cafe_id),
            _ => ScreenParams::default(),
        };
    }
}

/// An entry in the navigation bar shown to logged-in users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// Jump to a screen.
    Go {
        /// Button label.
        label: &'static str,
        /// Target screen.
        screen: Screen,
    },
    /// End the session.
    Logout,
}

impl NavItem {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Go { label, .. } => label,
            Self::Logout => "Logout",
        }
    }
}

/// The navigation bar, in display order.
pub const NAV_BAR: [NavItem; 4] = [
    NavItem::Go {
        label: "Coffee Shops",
        screen: Screen::CafeList,
    },
    NavItem::Go {
        label: "Scan QR",
        screen: Screen::ScanQr,
    },
    NavItem::Go {
        label: "Rate Cafe",
        screen: Screen::RateCafe,
    },
    NavItem::Logout,
];
