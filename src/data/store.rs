//! Review Store
//!
//! In-memory listings and reviews behind an async RwLock. Every query scans
//! the dataset, which is the cost the caches in front of it avoid.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::data::sample;
use crate::error::DataError;
use crate::models::{
    Listing, ListingSummary, ListingsQuery, PropertyDetail, Review, ReviewStats, ReviewStatus,
    ReviewsPage, ReviewsQuery, DEFAULT_PAGE_SIZE,
};

/// Serialized form of the data behind the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub listings: Vec<Listing>,
    pub reviews: Vec<Review>,
}

impl Dataset {
    /// Checks id uniqueness and that every review points at a known listing.
    pub fn validate(&self) -> Result<(), DataError> {
        let mut listing_ids = HashSet::new();
        for listing in &self.listings {
            if !listing_ids.insert(listing.id) {
                return Err(DataError::Invalid(format!(
                    "duplicate listing id {}",
                    listing.id
                )));
            }
        }

        let mut review_ids = HashSet::new();
        for review in &self.reviews {
            if !review_ids.insert(review.id) {
                return Err(DataError::Invalid(format!(
                    "duplicate review id {}",
                    review.id
                )));
            }
            if !listing_ids.contains(&review.listing_id) {
                return Err(DataError::Invalid(format!(
                    "review {} references unknown listing {}",
                    review.id, review.listing_id
                )));
            }
        }
        Ok(())
    }
}

// == Review Store ==
/// Shared handle to the dataset. Clones refer to the same data.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    data: Arc<RwLock<Dataset>>,
}

impl ReviewStore {
    /// Wraps a validated dataset.
    pub fn new(dataset: Dataset) -> Result<Self, DataError> {
        dataset.validate()?;
        Ok(Self {
            data: Arc::new(RwLock::new(dataset)),
        })
    }

    /// Store seeded with the built-in sample listings and reviews.
    pub fn sample() -> Self {
        Self {
            data: Arc::new(RwLock::new(sample::dataset())),
        }
    }

    /// Loads a JSON dataset from `path`.
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let dataset: Dataset = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            listings = dataset.listings.len(),
            reviews = dataset.reviews.len(),
            "Dataset loaded"
        );
        Self::new(dataset)
    }

    // == Listings ==
    /// Listing summaries, ordered by listing id.
    pub async fn listing_summaries(&self, query: &ListingsQuery) -> Vec<ListingSummary> {
        let data = self.data.read().await;
        let city = query.city.as_deref().map(str::to_lowercase);

        let mut summaries: Vec<ListingSummary> = data
            .listings
            .iter()
            .filter(|l| city.as_deref().map_or(true, |c| l.city.to_lowercase() == c))
            .map(|listing| {
                let reviews: Vec<&Review> = data
                    .reviews
                    .iter()
                    .filter(|r| r.listing_id == listing.id)
                    .collect();
                let approved: Vec<&Review> = reviews
                    .iter()
                    .copied()
                    .filter(|r| r.status == ReviewStatus::Approved)
                    .collect();

                ListingSummary {
                    listing: listing.clone(),
                    review_count: reviews.len(),
                    approved_count: approved.len(),
                    average_rating: average_rating(approved.iter().copied()),
                }
            })
            .collect();

        summaries.sort_by_key(|s| s.listing.id);
        summaries
    }

    // == Reviews ==
    /// Filtered reviews, newest first, one page at a time.
    pub async fn reviews(&self, query: &ReviewsQuery) -> ReviewsPage {
        let data = self.data.read().await;
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let mut matching: Vec<&Review> = data
            .reviews
            .iter()
            .filter(|r| query.listing_id.map_or(true, |id| r.listing_id == id))
            .filter(|r| query.status.map_or(true, |s| r.status == s))
            .filter(|r| query.channel.map_or(true, |c| r.channel == c))
            .filter(|r| match query.min_rating {
                Some(min) => r.rating.is_some_and(|rating| rating >= min),
                None => true,
            })
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));

        let total = matching.len();
        let offset = (page as usize - 1).saturating_mul(limit as usize);
        let reviews = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();

        ReviewsPage {
            reviews,
            total,
            page,
            limit,
        }
    }

    // == Stats ==
    /// Totals by status and channel across every review.
    pub async fn review_stats(&self) -> ReviewStats {
        let data = self.data.read().await;
        let count = |status: ReviewStatus| {
            data.reviews
                .iter()
                .filter(|r| r.status == status)
                .count()
        };

        let mut by_channel = BTreeMap::new();
        for review in &data.reviews {
            *by_channel
                .entry(review.channel.as_str().to_string())
                .or_insert(0) += 1;
        }

        ReviewStats {
            total: data.reviews.len(),
            pending: count(ReviewStatus::Pending),
            approved: count(ReviewStatus::Approved),
            rejected: count(ReviewStatus::Rejected),
            average_rating: average_rating(data.reviews.iter()),
            by_channel,
        }
    }

    // == Property Detail ==
    /// A listing with its approved reviews, `None` for an unknown id.
    pub async fn property_detail(&self, listing_id: u64) -> Option<PropertyDetail> {
        let data = self.data.read().await;
        let listing = data.listings.iter().find(|l| l.id == listing_id)?.clone();

        let mut reviews: Vec<Review> = data
            .reviews
            .iter()
            .filter(|r| r.listing_id == listing_id && r.status == ReviewStatus::Approved)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Some(PropertyDetail {
            average_rating: average_rating(reviews.iter()),
            review_count: reviews.len(),
            listing,
            reviews,
        })
    }

    // == Update Status ==
    /// Sets a review's moderation status, returning the updated review or
    /// `None` for an unknown id.
    pub async fn update_status(&self, review_id: u64, status: ReviewStatus) -> Option<Review> {
        let mut data = self.data.write().await;
        let review = data.reviews.iter_mut().find(|r| r.id == review_id)?;
        review.status = status;
        Some(review.clone())
    }
}

/// Mean of the given reviews' ratings rounded to two decimals, ignoring
/// unrated reviews. `None` when nothing is rated.
fn average_rating<'a>(reviews: impl Iterator<Item = &'a Review>) -> Option<f64> {
    let (sum, count) = reviews
        .filter_map(|r| r.rating)
        .fold((0.0, 0usize), |(sum, count), rating| (sum + rating, count + 1));

    if count == 0 {
        None
    } else {
        Some((sum / count as f64 * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;
    use chrono::{DateTime, Utc};

    fn listing(id: u64, city: &str) -> Listing {
        Listing {
            id,
            name: format!("Listing {}", id),
            address: format!("{} High St", id),
            city: city.to_string(),
        }
    }

    fn review(
        id: u64,
        listing_id: u64,
        rating: Option<f64>,
        status: ReviewStatus,
        ts: i64,
    ) -> Review {
        Review {
            id,
            listing_id,
            guest_name: format!("Guest {}", id),
            rating,
            text: "Nice stay".to_string(),
            channel: if id % 2 == 0 { Channel::Airbnb } else { Channel::Hostaway },
            status,
            submitted_at: DateTime::<Utc>::from_timestamp(ts, 0).unwrap(),
        }
    }

    fn test_store() -> ReviewStore {
        ReviewStore::new(Dataset {
            listings: vec![listing(1, "London"), listing(2, "Paris")],
            reviews: vec![
                review(1, 1, Some(9.0), ReviewStatus::Approved, 100),
                review(2, 1, Some(7.0), ReviewStatus::Pending, 200),
                review(3, 1, None, ReviewStatus::Approved, 300),
                review(4, 2, Some(4.0), ReviewStatus::Rejected, 400),
                review(5, 2, Some(10.0), ReviewStatus::Approved, 500),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_dataset_validation() {
        let duplicate = Dataset {
            listings: vec![listing(1, "London"), listing(1, "Paris")],
            reviews: vec![],
        };
        assert!(matches!(duplicate.validate(), Err(DataError::Invalid(_))));

        let dangling = Dataset {
            listings: vec![listing(1, "London")],
            reviews: vec![review(1, 7, None, ReviewStatus::Pending, 0)],
        };
        assert!(matches!(dangling.validate(), Err(DataError::Invalid(_))));
    }

    #[test]
    fn test_sample_dataset_is_valid() {
        assert!(sample::dataset().validate().is_ok());
    }

    #[tokio::test]
    async fn test_listing_summaries() {
        let store = test_store();

        let all = store.listing_summaries(&ListingsQuery::default()).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].review_count, 3);
        assert_eq!(all[0].approved_count, 2);
        assert_eq!(all[0].average_rating, Some(9.0));

        let paris = store
            .listing_summaries(&ListingsQuery {
                city: Some("paris".to_string()),
            })
            .await;
        assert_eq!(paris.len(), 1);
        assert_eq!(paris[0].listing.id, 2);
    }

    #[tokio::test]
    async fn test_reviews_filtering_and_order() {
        let store = test_store();

        let page = store
            .reviews(&ReviewsQuery {
                listing_id: Some(1),
                ..Default::default()
            })
            .await;
        let ids: Vec<u64> = page.reviews.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(page.total, 3);

        let rated = store
            .reviews(&ReviewsQuery {
                min_rating: Some(8.0),
                ..Default::default()
            })
            .await;
        let ids: Vec<u64> = rated.reviews.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[tokio::test]
    async fn test_reviews_pagination() {
        let store = test_store();

        let page = store
            .reviews(&ReviewsQuery {
                page: Some(2),
                limit: Some(2),
                ..Default::default()
            })
            .await;
        let ids: Vec<u64> = page.reviews.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);

        let beyond = store
            .reviews(&ReviewsQuery {
                page: Some(9),
                limit: Some(2),
                ..Default::default()
            })
            .await;
        assert!(beyond.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_review_stats() {
        let stats = test_store().review_stats().await;
        assert_eq!(stats.total, 5);
        assert_eq!(stats.approved, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.average_rating, Some(7.5));
        assert_eq!(stats.by_channel["hostaway"], 3);
        assert_eq!(stats.by_channel["airbnb"], 2);
    }

    #[tokio::test]
    async fn test_property_detail() {
        let store = test_store();

        let detail = store.property_detail(2).await.unwrap();
        assert_eq!(detail.review_count, 1);
        assert_eq!(detail.average_rating, Some(10.0));

        assert!(store.property_detail(99).await.is_none());
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = test_store();

        let updated = store.update_status(2, ReviewStatus::Approved).await.unwrap();
        assert_eq!(updated.status, ReviewStatus::Approved);
        assert_eq!(store.review_stats().await.approved, 4);

        assert!(store.update_status(99, ReviewStatus::Approved).await.is_none());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("review_cache_{}.json", std::process::id()));
        let json = serde_json::to_string(&sample::dataset()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let store = ReviewStore::load(&path).await.unwrap();
        assert!(!store.review_stats().await.by_channel.is_empty());

        tokio::fs::remove_file(&path).await.unwrap();
        assert!(matches!(ReviewStore::load(&path).await, Err(DataError::Io(_))));
    }
}
