//! Storefront content managed from the back office: reviews and hero slides.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ReviewId, SliderId};

/// A customer review.
///
/// Only approved reviews are shown on the storefront. Showcase reviews also
/// appear in the home page carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: Option<ProductId>,
    pub user_name: String,
    pub user_email: Option<String>,
    pub rating: i16,
    pub comment: String,
    pub image: Option<String>,
    /// Screenshot of the review as posted elsewhere (e.g. a chat message).
    pub screenshot_image: Option<String>,
    /// Where the review came from, e.g. "facebook".
    pub source: Option<String>,
    pub is_showcase: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Lowest accepted rating.
    pub const MIN_RATING: i16 = 1;
    /// Highest accepted rating.
    pub const MAX_RATING: i16 = 5;

    /// Whether `rating` is within the accepted range.
    #[must_use]
    pub const fn is_valid_rating(rating: i16) -> bool {
        rating >= Self::MIN_RATING && rating <= Self::MAX_RATING
    }
}

/// A hero slide on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SliderContent {
    pub id: SliderId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: String,
    /// Alternate artwork for narrow screens.
    pub phone_image: Option<String>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(!Review::is_valid_rating(0));
        assert!(Review::is_valid_rating(1));
        assert!(Review::is_valid_rating(5));
        assert!(!Review::is_valid_rating(6));
    }
}
