//! Response DTOs for the dashboard API
//!
//! Defines the structure of outgoing HTTP response bodies. Read responses are
//! what the caches store, as `serde_json::Value`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::models::{Listing, Review};

/// One row of `GET /api/listings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    #[serde(flatten)]
    pub listing: Listing,
    /// Reviews of the listing in any status
    pub review_count: usize,
    pub approved_count: usize,
    /// Average rating of approved reviews
    pub average_rating: Option<f64>,
}

/// Body of `GET /api/reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewsPage {
    pub reviews: Vec<Review>,
    /// Number of reviews matching the filters, across all pages
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

/// Body of `GET /api/reviews/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Average over every rated review
    pub average_rating: Option<f64>,
    /// Review count per channel name
    pub by_channel: BTreeMap<String, usize>,
}

/// Body of `GET /api/properties/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetail {
    pub listing: Listing,
    /// Approved reviews only, newest first
    pub reviews: Vec<Review>,
    pub review_count: usize,
    pub average_rating: Option<f64>,
}

/// Body of `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub caches: BTreeMap<String, CacheStats>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
