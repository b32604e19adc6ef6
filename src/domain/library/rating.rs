// SPDX-License-Identifier: MPL-2.0
//! Star rating domain type.

use serde::{Deserialize, Serialize};

/// Rating bounds (0 to 5 stars).
pub mod rating_bounds {
    /// Minimum rating.
    pub const MIN: u8 = 0;
    /// Maximum rating.
    pub const MAX: u8 = 5;
}

/// Star rating, guaranteed to be within 0–5.
///
/// # Example
///
/// ```
/// use paged_lightbox::domain::library::Rating;
///
/// assert_eq!(Rating::new(4).value(), 4);
/// assert_eq!(Rating::new(9).value(), 5); // Clamped to max
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Creates a new rating, clamping to valid range.
    #[must_use]
    pub fn new(stars: u8) -> Self {
        Self(stars.clamp(rating_bounds::MIN, rating_bounds::MAX))
    }

    /// Returns the number of stars.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true if this is the maximum rating.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= rating_bounds::MAX
    }
}

impl From<u8> for Rating {
    fn from(stars: u8) -> Self {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
