//! Built-in sample dataset, served when no `DATA_FILE` is configured.

use chrono::{DateTime, Utc};

use crate::data::Dataset;
use crate::models::{Channel, Listing, Review, ReviewStatus};

pub(crate) fn dataset() -> Dataset {
    let listings = vec![
        listing(1, "2B N1 A - 29 Shoreditch Heights", "29 Shoreditch High St", "London"),
        listing(2, "Studio S3 - Canal View", "4 Regent's Canal Walk", "London"),
        listing(3, "Le Marais Loft", "12 Rue des Archives", "Paris"),
    ];

    let reviews = vec![
        review(
            1,
            1,
            "Shane Finkelstein",
            Some(10.0),
            "Bad experience, kitchen was not clean at check-in.",
            Channel::Hostaway,
            ReviewStatus::Pending,
            1_704_103_200,
        ),
        review(
            2,
            1,
            "Maya Okafor",
            Some(9.0),
            "Great location and very responsive host.",
            Channel::Airbnb,
            ReviewStatus::Approved,
            1_705_312_800,
        ),
        review(
            3,
            1,
            "Jonas Weber",
            Some(8.0),
            "Comfortable beds, a bit noisy at night.",
            Channel::Booking,
            ReviewStatus::Approved,
            1_706_522_400,
        ),
        review(
            4,
            2,
            "Lucia Romano",
            None,
            "Check-in instructions arrived late.",
            Channel::Hostaway,
            ReviewStatus::Rejected,
            1_707_732_000,
        ),
        review(
            5,
            2,
            "Tom Becker",
            Some(9.5),
            "Lovely canal views, would stay again.",
            Channel::Direct,
            ReviewStatus::Approved,
            1_708_941_600,
        ),
        review(
            6,
            2,
            "Aiko Tanaka",
            Some(6.0),
            "Smaller than the photos suggest.",
            Channel::Airbnb,
            ReviewStatus::Pending,
            1_710_151_200,
        ),
        review(
            7,
            3,
            "Claire Dubois",
            Some(10.0),
            "Perfect Paris base, spotless apartment.",
            Channel::Hostaway,
            ReviewStatus::Approved,
            1_711_360_800,
        ),
        review(
            8,
            3,
            "Rafael Silva",
            Some(7.0),
            "Nice flat but the stairs are steep.",
            Channel::Booking,
            ReviewStatus::Pending,
            1_712_570_400,
        ),
    ];

    Dataset { listings, reviews }
}

fn listing(id: u64, name: &str, address: &str, city: &str) -> Listing {
    Listing {
        id,
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn review(
    id: u64,
    listing_id: u64,
    guest_name: &str,
    rating: Option<f64>,
    text: &str,
    channel: Channel,
    status: ReviewStatus,
    submitted_at: i64,
) -> Review {
    Review {
        id,
        listing_id,
        guest_name: guest_name.to_string(),
        rating,
        text: text.to_string(),
        channel,
        status,
        submitted_at: DateTime::<Utc>::from_timestamp(submitted_at, 0).unwrap_or_default(),
    }
}
