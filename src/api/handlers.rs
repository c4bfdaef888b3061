//! API Handlers
//!
//! Read handlers follow the cache-aside flow: build a key from the normalized
//! query, return the cached value on a hit, otherwise load from the store and
//! cache the result. Write handlers invalidate the review-derived caches
//! before responding.

use std::future::Future;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::cache::{build_key, CacheRegistry, TtlCache};
use crate::data::ReviewStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CacheStatsResponse, HealthResponse, ListingsQuery, Review, ReviewsQuery, UpdateStatusRequest,
};

/// Response header reporting whether the body came from the cache
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Listings and reviews
    pub store: ReviewStore,
    /// Named caches in front of the store
    pub caches: CacheRegistry,
}

impl AppState {
    /// Creates a new AppState from a data store and its caches.
    pub fn new(store: ReviewStore, caches: CacheRegistry) -> Self {
        Self { store, caches }
    }
}

// == Cached Response ==
/// Whether a read was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// JSON body plus its `x-cache` status.
#[derive(Debug)]
pub struct Cached {
    pub status: CacheStatus,
    pub body: Value,
}

impl IntoResponse for Cached {
    fn into_response(self) -> Response {
        (
            [(CACHE_STATUS_HEADER, self.status.as_str())],
            Json(self.body),
        )
            .into_response()
    }
}

/// Serves `key` from `cache`, or awaits `load` and caches its result.
///
/// `load` is only polled on a miss. Cache failures are logged and the
/// request is served uncached; load errors propagate and are never cached.
pub async fn cache_aside<T, Fut>(cache: &TtlCache<Value>, key: &str, load: Fut) -> ApiResult<Cached>
where
    T: Serialize,
    Fut: Future<Output = ApiResult<T>>,
{
    match cache.get(key).await {
        Ok(Some(body)) => {
            debug!(cache = cache.name(), key, "Cache hit");
            return Ok(Cached {
                status: CacheStatus::Hit,
                body,
            });
        }
        Ok(None) => debug!(cache = cache.name(), key, "Cache miss"),
        Err(e) => warn!(cache = cache.name(), key, error = %e, "Cache read failed"),
    }

    let body = serde_json::to_value(load.await?)?;
    if let Err(e) = cache.set(key, body.clone(), None).await {
        warn!(cache = cache.name(), key, error = %e, "Cache write failed");
    }

    Ok(Cached {
        status: CacheStatus::Miss,
        body,
    })
}

/// Handler for GET /api/listings
pub async fn listings_handler(
    State(state): State<AppState>,
    Query(query): Query<ListingsQuery>,
) -> ApiResult<Cached> {
    let query = query.normalized();
    let key = build_key("listings", &query)?;

    cache_aside(&state.caches.listings, &key, async {
        Ok(state.store.listing_summaries(&query).await)
    })
    .await
}

/// Handler for GET /api/reviews
pub async fn reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> ApiResult<Cached> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }
    let query = query.normalized();
    let key = build_key("reviews", &query)?;

    cache_aside(&state.caches.reviews, &key, async {
        Ok(state.store.reviews(&query).await)
    })
    .await
}

/// Handler for GET /api/reviews/stats
pub async fn review_stats_handler(State(state): State<AppState>) -> ApiResult<Cached> {
    let key = build_key("stats", &json!({}))?;

    cache_aside(&state.caches.stats, &key, async {
        Ok(state.store.review_stats().await)
    })
    .await
}

/// Handler for GET /api/properties/:id
pub async fn property_handler(
    State(state): State<AppState>,
    Path(listing_id): Path<u64>,
) -> ApiResult<Cached> {
    let key = build_key("property", &json!({ "id": listing_id }))?;

    cache_aside(&state.caches.property_detail, &key, async {
        state
            .store
            .property_detail(listing_id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Listing {}", listing_id)))
    })
    .await
}

/// Handler for PATCH /api/reviews/:id/status
///
/// Updates the review, then clears every review-derived cache before
/// returning the updated review.
pub async fn update_review_status_handler(
    State(state): State<AppState>,
    Path(review_id): Path<u64>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Review>> {
    let review = state
        .store
        .update_status(review_id, req.status)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Review {}", review_id)))?;

    state.caches.invalidate_review_data().await?;
    info!(review_id, status = req.status.as_str(), "Review status updated");

    Ok(Json(review))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<CacheStatsResponse>> {
    let caches = state.caches.all_stats().await?;
    Ok(Json(CacheStatsResponse { caches }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
