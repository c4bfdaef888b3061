//! Domain types and request/response models for the dashboard API
//!
//! This module defines the listings and reviews served by the API and the
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{Channel, Listing, Review, ReviewStatus};
pub use requests::{
    ListingsQuery, ReviewsQuery, UpdateStatusRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use responses::{
    CacheStatsResponse, ErrorResponse, HealthResponse, ListingSummary, PropertyDetail,
    ReviewStats, ReviewsPage,
};
