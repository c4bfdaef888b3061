//! Domain types: property listings and guest reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A property listing managed from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub city: String,
}

/// Moderation state of a review. Only approved reviews are shown publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Where a review was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Imported through the Hostaway integration
    Hostaway,
    Airbnb,
    Booking,
    Direct,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Hostaway => "hostaway",
            Channel::Airbnb => "airbnb",
            Channel::Booking => "booking",
            Channel::Direct => "direct",
        }
    }
}

/// A guest review of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub listing_id: u64,
    pub guest_name: String,
    /// Overall rating out of 10, when the guest gave one
    #[serde(default)]
    pub rating: Option<f64>,
    pub text: String,
    pub channel: Channel,
    pub status: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
}
