//! Cross-reference resolution for the term catalog
//!
//! This module provides:
//! - Reference index construction (id, lowercase name and slug keys)
//! - Layered resolution of "see also" / "contrasts with" labels
//! - Inline `*mention` parsing for definition bodies

pub mod index;
pub mod mentions;
pub mod resolver;

pub use index::{id_slug, reference_slug, ReferenceIndex};
pub use mentions::{parse_definition, plain_text, TextSegment};
pub use resolver::{resolve, resolve_related, RelatedLink, Relation};
