//! Term catalog for Theologia
//!
//! This module provides:
//! - Term models and the bundled catalog file format
//! - Catalog loading with id/name validation
//! - Custom (user-created) term storage
//! - Immutable snapshots with id, letter and reference indices

pub mod models;
pub mod snapshot;
pub mod storage;

pub use models::*;
pub use snapshot::{CatalogHandle, CatalogSnapshot};
pub use storage::{
    is_custom_id, load_catalog, parse_catalog, validate_terms, CatalogError, CustomTermStorage,
    CUSTOM_PREFIX,
};
