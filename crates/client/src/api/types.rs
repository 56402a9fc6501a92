//! Request and response types for the Coffee Society REST API.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use coffee_society_core::{BaristaId, CafeId, Email, MenuPrice, Rating, UserId};

/// Image shown for cafes without one.
pub const CAFE_PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/600x400/CCCCCC/333333?text=Coffee+Shop";

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /auth/register`.
#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a Email,
    pub password: &'a str,
}

impl std::fmt::Debug for RegisterRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a Email,
    pub password: &'a str,
}

impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of the register and login endpoints.
#[derive(Deserialize)]
pub struct AuthResponse {
    /// Session credential (a JWT).
    pub token: String,
    /// Account summary, when the backend includes one.
    #[serde(default)]
    pub user: Option<AccountSummary>,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Account fields returned alongside a token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountSummary {
    #[serde(alias = "_id", default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// User actions
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /user/scan`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest<'a> {
    pub cafe_id: &'a CafeId,
}

/// Body of `POST /user/rate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub cafe_id: CafeId,
    pub rating: Rating,
    pub comment: String,
}

/// `{ message }` reply of the user action endpoints, also used for errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Cafes
// ─────────────────────────────────────────────────────────────────────────────

/// A coffee shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    #[serde(rename = "_id")]
    pub id: CafeId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Average rating, 0-5.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_community_partner: bool,
    /// Item name to price.
    #[serde(default)]
    pub menu: Option<BTreeMap<String, MenuEntry>>,
}

impl Cafe {
    /// The cafe's image, or the shared placeholder.
    #[must_use]
    pub fn image_url_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(CAFE_PLACEHOLDER_IMAGE)
    }

    /// Rating used for ordering; unrated cafes count as 0.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Order cafes for the directory: community partners first, then by rating,
/// highest first. Ties keep the backend's order.
pub fn sort_for_directory(cafes: &mut [Cafe]) {
    cafes.sort_by(|a, b| {
        match (a.is_community_partner, b.is_community_partner) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        }
    });
}

/// A menu price as sent by the backend.
///
/// Menus are free-form, so anything that is not a number is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuEntry {
    Price(MenuPrice),
    Text(String),
    Other(serde_json::Value),
}

impl MenuEntry {
    /// The numeric price, if the backend sent one.
    #[must_use]
    pub const fn price(&self) -> Option<MenuPrice> {
        match self {
            Self::Price(price) => Some(*price),
            Self::Text(_) | Self::Other(_) => None,
        }
    }
}

impl std::fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Price(price) => write!(f, "{price}"),
            Self::Text(text) => f.write_str(text),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// A barista working at a cafe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barista {
    #[serde(rename = "_id", default)]
    pub id: Option<BaristaId>,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Barista {
    /// Upper-cased first letter of the name, for avatars.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn cafe(id: &str, partner: bool, rating: Option<f64>) -> Cafe {
        Cafe {
            id: CafeId::new(id),
            name: id.to_uppercase(),
            address: None,
            description: None,
            image_url: None,
            rating,
            is_community_partner: partner,
            menu: None,
        }
    }

    #[test]
    fn test_cafe_from_backend_json() {
        let cafe: Cafe = serde_json::from_value(json!({
            "_id": "65a1",
            "name": "Elika",
            "address": "Masada St 20, Haifa",
            "imageUrl": "https://img.example/elika.jpg",
            "rating": 4.6,
            "isCommunityPartner": true,
            "menu": { "Espresso": 9, "Cappuccino": "14.5" }
        }))
        .unwrap();

        assert_eq!(cafe.id.as_str(), "65a1");
        assert!(cafe.is_community_partner);
        let menu = cafe.menu.unwrap();
        assert_eq!(menu["Cappuccino"].to_string(), "₪14.50");
        assert_eq!(menu["Espresso"].to_string(), "₪9.00");
    }

    #[test]
    fn test_menu_keeps_non_numeric_prices() {
        let cafes: Vec<Cafe> = serde_json::from_value(json!([{
            "_id": "1",
            "name": "Shuk Coffee",
            "menu": { "Espresso": "12 NIS", "Latte": 15, "Special": null }
        }]))
        .unwrap();

        let menu = cafes[0].menu.as_ref().unwrap();
        assert_eq!(menu["Espresso"], MenuEntry::Text("12 NIS".to_string()));
        assert_eq!(menu["Espresso"].to_string(), "12 NIS");
        assert!(menu["Espresso"].price().is_none());
        assert_eq!(menu["Latte"].to_string(), "₪15.00");
        assert!(menu["Latte"].price().is_some());
        assert_eq!(menu["Special"].to_string(), "null");
    }

    #[test]
    fn test_cafe_minimal_json() {
        let cafe: Cafe = serde_json::from_value(json!({ "_id": "1", "name": "Pop-up" })).unwrap();
        assert!(!cafe.is_community_partner);
        assert_eq!(cafe.image_url_or_placeholder(), CAFE_PLACEHOLDER_IMAGE);
        assert!((cafe.rating_or_zero() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sort_for_directory() {
        let mut cafes = vec![
            cafe("a", false, Some(4.9)),
            cafe("b", true, Some(3.0)),
            cafe("c", false, None),
            cafe("d", true, Some(4.5)),
            cafe("e", false, Some(4.9)),
        ];
        sort_for_directory(&mut cafes);
        let order: Vec<_> = cafes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["d", "b", "a", "e", "c"]);
    }

    #[test]
    fn test_rate_request_wire_format() {
        let request = RateRequest {
            cafe_id: CafeId::new("65a1"),
            rating: Rating::new(4).unwrap(),
            comment: "Great flat white".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "cafeId": "65a1", "rating": 4, "comment": "Great flat white" })
        );
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let email = Email::parse("noa@example.com").unwrap();
        let request = LoginRequest {
            email: &email,
            password: "hunter22",
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("noa@example.com"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_auth_response_accepts_mongo_user() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "a.b.c",
            "user": { "_id": "u1", "username": "noa", "email": "noa@example.com" }
        }))
        .unwrap();
        assert_eq!(response.user.unwrap().id.unwrap().as_str(), "u1");
        assert!(!format!("{:?}", AuthResponse { token: "a.b.c".into(), user: None }).contains("a.b.c"));
    }

    #[test]
    fn test_barista_without_id() {
        let baristas: Vec<Barista> = serde_json::from_value(json!([
            { "name": "maya" },
            { "_id": "b2", "name": "omer", "rating": 4.2 }
        ]))
        .unwrap();
        assert!(baristas[0].id.is_none());
        assert_eq!(baristas[0].initial(), Some('M'));
        assert_eq!(baristas[1].id.as_ref().unwrap().as_str(), "b2");
    }

    #[test]
    fn test_barista_initial() {
        let barista: Barista =
            serde_json::from_value(json!({ "_id": "b1", "name": "maya", "specialty": "Latte art" }))
                .unwrap();
        assert_eq!(barista.initial(), Some('M'));
    }
}
