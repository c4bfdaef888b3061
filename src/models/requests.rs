//! Request DTOs for the dashboard API
//!
//! Query strings double as cache-key parameters, so absent filters are
//! skipped when serialized and pagination is normalized before use.

use serde::{Deserialize, Serialize};

use crate::models::{Channel, ReviewStatus};

/// Default page size for review listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query string of `GET /api/listings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingsQuery {
    /// Case-insensitive city filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl ListingsQuery {
    /// Lower-cases and trims the city so equivalent queries share a key.
    pub fn normalized(&self) -> Self {
        Self {
            city: self
                .city
                .as_deref()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty()),
        }
    }
}

/// Query string of `GET /api/reviews`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    /// Inclusive lower bound on rating; unrated reviews never match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ReviewsQuery {
    /// Validates the query.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(rating) = self.min_rating {
            if !(0.0..=10.0).contains(&rating) {
                return Some("min_rating must be between 0 and 10".to_string());
            }
        }
        if self.page == Some(0) {
            return Some("page numbers start at 1".to_string());
        }
        None
    }

    /// Fills in pagination defaults and clamps the page size.
    pub fn normalized(&self) -> Self {
        Self {
            page: Some(self.page.unwrap_or(1).max(1)),
            limit: Some(
                self.limit
                    .unwrap_or(DEFAULT_PAGE_SIZE)
                    .clamp(1, MAX_PAGE_SIZE),
            ),
            ..self.clone()
        }
    }
}

/// Request body of `PATCH /api/reviews/:id/status`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReviewStatus,
}
