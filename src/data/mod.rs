//! Data Module
//!
//! The listings and reviews the dashboard reads and moderates.

mod sample;
mod store;

pub use store::{Dataset, ReviewStore};
