//! Lookup keys for resolving free-text references to term ids
//!
//! Each term registers three keys: its raw id, its lowercased display name,
//! and the name's slug. Keys keep the position of their first registration;
//! re-registering a key overwrites the target id in place.

use std::collections::HashMap;

use crate::catalog::Term;

/// Slug used for reference lookup keys.
///
/// Lowercases, drops every character outside `[a-z0-9]` and whitespace, then
/// collapses whitespace runs into a single hyphen. Leading and trailing
/// whitespace also become hyphens, so `" Grace"` slugs to `"-grace"`.
pub fn reference_slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_space = false;

    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_space = false;
        }
    }

    slug
}

/// Slug used when minting ids for user-created terms
///
/// Unlike [`reference_slug`], hyphens in the input survive, repeated hyphens
/// collapse, and the result never starts or ends with a hyphen.
pub fn id_slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut slug = String::with_capacity(lower.len());

    for c in lower.chars() {
        let mapped = if c.is_whitespace() || c == '-' {
            '-'
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            continue;
        };

        if mapped == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(mapped);
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Ordered key → term id map built from one catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ReferenceIndex {
    /// Build the index for a catalog, registering keys term by term
    pub fn build(terms: &[Term]) -> Self {
        let mut index = Self {
            entries: Vec::with_capacity(terms.len() * 3),
            positions: HashMap::with_capacity(terms.len() * 3),
        };

        for term in terms {
            index.register(&term.id, &term.id);
            index.register(&term.name.to_lowercase(), &term.id);
            index.register(&reference_slug(&term.name), &term.id);
        }

        index
    }

    fn register(&mut self, key: &str, id: &str) {
        match self.positions.get(key) {
            Some(&pos) => {
                if self.entries[pos].1 != id {
                    log::debug!(
                        "Reference key '{}' reassigned from '{}' to '{}'",
                        key,
                        self.entries[pos].1,
                        id
                    );
                }
                self.entries[pos].1 = id.to_string();
            }
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), id.to_string()));
            }
        }
    }

    /// Exact key lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Iterate `(key, id)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
