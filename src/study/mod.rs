//! Study history for Theologia
//!
//! This module provides:
//! - Exposure tracking (write-through side of the feed)
//! - Saved (bookmarked) terms
//! - Daily streak statistics

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{StudyStorage, StudyStorageError};
