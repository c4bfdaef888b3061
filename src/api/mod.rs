//! API Module
//!
//! HTTP handlers and routing for the review dashboard API.
//!
//! # Endpoints
//! - `GET /api/listings` - Listings with review summaries (cached)
//! - `GET /api/reviews` - Filtered, paginated reviews (cached)
//! - `GET /api/reviews/stats` - Aggregate review statistics (cached)
//! - `GET /api/properties/:id` - Listing detail with approved reviews (cached)
//! - `PATCH /api/reviews/:id/status` - Change a review's status, invalidating caches
//! - `GET /api/cache/stats` - Per-cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
