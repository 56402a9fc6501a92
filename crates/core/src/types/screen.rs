//! Screen identifiers and their parameters.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::id::CafeId;

/// Every screen the client can show.
///
/// The set is closed; unknown names coming from user input resolve to
/// [`Screen::Home`] through [`Screen::route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Home,
    Login,
    Register,
    CafeList,
    CafeDetail,
    ScanQr,
    RateCafe,
}

impl Screen {
    /// All screens, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::CafeList,
        Self::CafeDetail,
        Self::ScanQr,
        Self::RateCafe,
    ];

    /// The wire/display name of the screen.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::CafeList => "cafeList",
            Self::CafeDetail => "cafeDetail",
            Self::ScanQr => "scanQr",
            Self::RateCafe => "rateCafe",
        }
    }

    /// Resolve a screen name, falling back to [`Screen::Home`].
    #[must_use]
    pub fn route(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| format!("invalid screen: {s}"))
    }
}

/// Parameters attached to the current screen.
///
/// Only [`Screen::CafeDetail`] carries anything (the cafe being shown); every
/// other screen has empty parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenParams {
    /// Cafe shown on the detail screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafe_id: Option<CafeId>,
}

impl ScreenParams {
    /// Parameters selecting a cafe.
    #[must_use]
    pub const fn cafe(cafe_id: CafeId) -> Self {
        Self {
            cafe_id: Some(cafe_id),
        }
    }

    /// Whether no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cafe_id.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for screen in Screen::ALL {
            assert_eq!(screen.as_str().parse::<Screen>().unwrap(), screen);
        }
    }

    #[test]
    fn test_route_defaults_to_home() {
        assert_eq!(Screen::route("cafeList"), Screen::CafeList);
        assert_eq!(Screen::route("adminPartnerDashboard"), Screen::Home);
        assert_eq!(Screen::route(""), Screen::Home);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        assert_eq!(
            serde_json::to_string(&Screen::CafeDetail).unwrap(),
            "\"cafeDetail\""
        );
        let params = ScreenParams::cafe(CafeId::new("X"));
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"cafeId":"X"}"#
        );
        assert_eq!(
            serde_json::to_string(&ScreenParams::default()).unwrap(),
            "{}"
        );
    }
}
