//! Study feed for the swipeable term view
//!
//! This module provides:
//! - Exposure records (last seen, times seen)
//! - Recency/novelty term weighting
//! - Weighted sampling without replacement into a feed queue

pub mod algorithm;
pub mod models;

pub use algorithm::{
    clamp_count, generate_queue, generate_queue_seeded, generate_queue_with, term_weight,
    DEFAULT_QUEUE_SIZE,
};
pub use models::{ExposureRecord, FeedError, WeightedCandidate};
