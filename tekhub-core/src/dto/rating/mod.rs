//! Rating DTOs for the Hub catalog API

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Body of `PUT /resource/{id}/rating`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRating {
    pub rating: u8,
}

impl UpdateRating {
    /// Build a rating request, accepting 1 to 5 stars
    pub fn new(rating: u8) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange);
        }
        Ok(Self { rating })
    }
}

/// The current user's rating of a resource
///
/// A user that has not rated the resource yet gets `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    #[serde(default)]
    pub rating: u8,
}

/// Average rating returned after an update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageRating {
    #[serde(rename = "avgRating")]
    pub avg_rating: f64,
}
