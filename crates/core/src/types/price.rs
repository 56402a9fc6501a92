//! Menu prices using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price on a coffee shop menu, in new Israeli shekels.
///
/// The backend stores menus as a free-form `item -> price` map, so the amount
/// deserializes from either a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuPrice(Decimal);

impl MenuPrice {
    /// Currency symbol used when displaying prices.
    pub const SYMBOL: &'static str = "₪";

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for MenuPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Self::SYMBOL, self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: MenuPrice = serde_json::from_str("12.5").unwrap();
        let from_string: MenuPrice = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_display() {
        let price = MenuPrice::new(Decimal::new(1450, 2));
        assert_eq!(price.to_string(), "₪14.50");
    }
}
