pub mod catalog;
pub mod config;
pub mod feed;
pub mod references;
pub mod study;

pub use catalog::{CatalogHandle, CatalogSnapshot, Term};
pub use config::AppConfig;
pub use feed::{generate_queue, ExposureRecord, FeedError};
pub use references::{resolve, ReferenceIndex, TextSegment};
pub use study::StudyStorage;
