//! Star rating submitted for a coffee shop.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// No star was picked (the form's initial value).
    #[error("no rating selected")]
    NotSelected,
    /// More stars than the scale allows.
    #[error("rating must be between {min} and {max} stars (got {got})")]
    OutOfRange {
        /// Smallest allowed rating.
        min: u8,
        /// Largest allowed rating.
        max: u8,
        /// The rejected value.
        got: u8,
    },
}

/// A 1-5 star rating.
///
/// Zero is the "nothing picked yet" state of the rating form and is rejected
/// with [`RatingError::NotSelected`] so callers can show the right prompt.
///
/// ```
/// use coffee_society_core::{Rating, RatingError};
///
/// assert_eq!(Rating::new(4).unwrap().stars(), 4);
/// assert_eq!(Rating::new(0), Err(RatingError::NotSelected));
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Create a rating from a star count.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::NotSelected`] for `0` and
    /// [`RatingError::OutOfRange`] for anything above [`Rating::MAX`].
    pub const fn new(stars: u8) -> Result<Self, RatingError> {
        match stars {
            0 => Err(RatingError::NotSelected),
            Self::MIN..=Self::MAX => Ok(Self(stars)),
            got => Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                got,
            }),
        }
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("★")?;
        }
        for _ in self.0..Self::MAX {
            f.write_str("☆")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        for stars in 1..=5 {
            assert_eq!(Rating::new(stars).unwrap().stars(), stars);
        }
    }

    #[test]
    fn test_zero_is_not_selected() {
        assert_eq!(Rating::new(0), Err(RatingError::NotSelected));
    }

    #[test]
    fn test_above_max() {
        assert_eq!(
            Rating::new(9),
            Err(RatingError::OutOfRange {
                min: 1,
                max: 5,
                got: 9
            })
        );
    }

    #[test]
    fn test_serializes_as_number() {
        let rating = Rating::new(3).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "3");
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }

    #[test]
    fn test_display_stars() {
        assert_eq!(Rating::new(2).unwrap().to_string(), "★★☆☆☆");
    }
}
