//! Layered resolution of free-text references
//!
//! Order: exact key, lowercased key, slug, then a prefix match in either
//! direction against every key in registration order. First match wins.

use serde::{Deserialize, Serialize};

use super::index::{reference_slug, ReferenceIndex};
use crate::catalog::Term;

/// Resolve a reference label to a term id, or `None` if nothing matches
pub fn resolve<'a>(index: &'a ReferenceIndex, reference: &str) -> Option<&'a str> {
    if reference.trim().is_empty() {
        return None;
    }

    if let Some(id) = index.get(reference) {
        return Some(id);
    }

    let lower = reference.to_lowercase();
    if let Some(id) = index.get(&lower) {
        return Some(id);
    }

    let slug = reference_slug(&lower);
    if let Some(id) = index.get(&slug) {
        return Some(id);
    }

    // An empty slug is a prefix of every key; punctuation-only input stops here
    if slug.is_empty() {
        return None;
    }

    let found = index
        .iter()
        .find(|(key, _)| !key.is_empty() && (key.starts_with(&slug) || slug.starts_with(key)))
        .map(|(_, id)| id);

    if found.is_none() {
        log::debug!("Unresolved reference '{}'", reference);
    }

    found
}

/// Which list of a term a related label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    SeeAlso,
    ContrastsWith,
}

/// A related-term label with its resolved target, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedLink {
    pub relation: Relation,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Resolve a term's "see also" then "contrasts with" labels, preserving order
pub fn resolve_related(index: &ReferenceIndex, term: &Term) -> Vec<RelatedLink> {
    let see_also = term.see_also.iter().map(|label| (Relation::SeeAlso, label));
    let contrasts = term
        .contrasts_with
        .iter()
        .map(|label| (Relation::ContrastsWith, label));

    see_also
        .chain(contrasts)
        .map(|(relation, label)| RelatedLink {
            relation,
            label: label.clone(),
            target: resolve(index, label).map(str::to_string),
        })
        .collect()
}
