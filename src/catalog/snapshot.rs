//! Immutable catalog snapshots
//!
//! A snapshot owns the term list plus every index derived from it. Reloading
//! builds a fresh snapshot and swaps it into the [`CatalogHandle`]; readers
//! holding the old `Arc` keep a consistent view.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::models::Term;
use crate::feed::{self, ExposureRecord, FeedError};
use crate::references::{self, ReferenceIndex, RelatedLink, TextSegment};

#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    terms: Vec<Term>,
    by_id: HashMap<String, usize>,
    references: ReferenceIndex,
}

impl CatalogSnapshot {
    /// Build a snapshot and its indices. Ids are expected to be unique;
    /// on a duplicate the id lookup keeps the later term.
    pub fn new(terms: Vec<Term>) -> Self {
        Self::with_custom(terms, Vec::new())
    }

    /// Build a snapshot from catalog terms plus user-created terms.
    ///
    /// Custom terms are listed and looked up by id like any other, but only
    /// catalog terms feed the reference index, so a user note can never
    /// capture a canonical "see also" or `*mention` link.
    pub fn with_custom(catalog: Vec<Term>, custom: Vec<Term>) -> Self {
        let references = ReferenceIndex::build(&catalog);

        let mut terms = catalog;
        terms.extend(custom);
        let by_id = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        Self {
            terms,
            by_id,
            references,
        }
    }

    /// Terms in catalog order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Term> {
        self.by_id.get(id).map(|&i| &self.terms[i])
    }

    pub fn references(&self) -> &ReferenceIndex {
        &self.references
    }

    /// Terms ordered by display name, case-insensitively
    pub fn sorted_by_name(&self) -> Vec<&Term> {
        let mut sorted: Vec<&Term> = self.terms.iter().collect();
        sorted.sort_by_cached_key(|t| t.name.to_lowercase());
        sorted
    }

    /// Distinct initials, sorted
    pub fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self
            .terms
            .iter()
            .filter_map(Term::initial)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        letters.sort_unstable();
        letters
    }

    /// Terms grouped under their initial, catalog order within each group
    pub fn grouped_by_letter(&self) -> BTreeMap<char, Vec<&Term>> {
        let mut groups: BTreeMap<char, Vec<&Term>> = BTreeMap::new();
        for term in &self.terms {
            if let Some(initial) = term.initial() {
                groups.entry(initial).or_default().push(term);
            }
        }
        groups
    }

    pub fn terms_by_letter(&self, letter: char) -> Vec<&Term> {
        let wanted = letter.to_uppercase().next();
        self.terms
            .iter()
            .filter(|t| t.initial().is_some() && t.initial() == wanted)
            .collect()
    }

    /// Case-insensitive substring search over names and short definitions.
    /// A blank query returns every term.
    pub fn search(&self, query: &str) -> Vec<&Term> {
        let query = query.trim();
        if query.is_empty() {
            return self.terms.iter().collect();
        }

        let q = query.to_lowercase();
        self.terms
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&q) || t.short_definition.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn random_term<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Term> {
        self.terms.choose(rng)
    }

    /// Resolve a free-text reference to a term id
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        references::resolve(&self.references, reference)
    }

    /// Resolve a reference straight to its term
    pub fn resolve_term(&self, reference: &str) -> Option<&Term> {
        self.resolve(reference).and_then(|id| self.get(id))
    }

    pub fn related(&self, term: &Term) -> Vec<RelatedLink> {
        references::resolve_related(&self.references, term)
    }

    /// Full definition split into plain text and resolved links
    pub fn linked_definition(&self, term: &Term) -> Vec<TextSegment> {
        references::parse_definition(&self.references, &term.full_definition)
    }

    /// Feed queue over this snapshot's terms
    pub fn feed<'a, R: Rng + ?Sized>(
        &'a self,
        exposures: &HashMap<String, ExposureRecord>,
        saved_ids: &HashSet<String>,
        count: usize,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<&'a Term>, FeedError> {
        feed::generate_queue_with(&self.terms, exposures, saved_ids, count, now, rng)
    }
}

/// Shared holder for the current snapshot
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogHandle {
    pub fn new(terms: Vec<Term>) -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot::new(terms))),
        }
    }

    /// The snapshot in effect right now
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a snapshot for `terms` and make it current
    pub fn replace(&self, terms: Vec<Term>) -> Arc<CatalogSnapshot> {
        self.replace_with_custom(terms, Vec::new())
    }

    /// Like [`replace`](Self::replace), keeping custom terms out of the
    /// reference index
    pub fn replace_with_custom(
        &self,
        catalog: Vec<Term>,
        custom: Vec<Term>,
    ) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(CatalogSnapshot::with_custom(catalog, custom));
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&snapshot);
        log::info!("Catalog snapshot replaced ({} terms)", snapshot.len());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_terms() -> Vec<Term> {
        let mut grace = Term::new("grace", "Grace");
        grace.short_definition = "Unmerited favour of God.".to_string();
        grace.full_definition = "Received by *faith alone.".to_string();
        grace.see_also = vec!["Faith Alone".to_string()];

        let mut faith = Term::new("faith-alone", "Faith Alone");
        faith.short_definition = "Sola fide.".to_string();

        vec![
            grace,
            faith,
            Term::new("eastern-orthodoxy", "Eastern Orthodoxy"),
            Term::new("apostasy", "apostasy"),
        ]
    }

    #[test]
    fn test_lookup_and_letters() {
        let snapshot = CatalogSnapshot::new(sample_terms());
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.get("grace").map(|t| t.name.as_str()), Some("Grace"));
        assert!(snapshot.get("missing").is_none());
        assert_eq!(snapshot.letters(), vec!['A', 'E', 'F', 'G']);

        let groups = snapshot.grouped_by_letter();
        assert_eq!(groups[&'A'][0].id, "apostasy");
        assert_eq!(snapshot.terms_by_letter('e').len(), 1);
    }

    #[test]
    fn test_sorted_by_name_ignores_case() {
        let snapshot = CatalogSnapshot::new(sample_terms());
        let names: Vec<&str> = snapshot.sorted_by_name().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["apostasy", "Eastern Orthodoxy", "Faith Alone", "Grace"]);
    }

    #[test]
    fn test_search() {
        let snapshot = CatalogSnapshot::new(sample_terms());
        assert_eq!(snapshot.search("  ").len(), 4);
        assert_eq!(snapshot.search("FAVOUR")[0].id, "grace");
        assert_eq!(snapshot.search("fide")[0].id, "faith-alone");
        assert!(snapshot.search("zzz").is_empty());
    }

    #[test]
    fn test_related_and_linked_definition() {
        let snapshot = CatalogSnapshot::new(sample_terms());
        let grace = snapshot.get("grace").unwrap();

        let related = snapshot.related(grace);
        assert_eq!(related[0].target.as_deref(), Some("faith-alone"));

        let segments = snapshot.linked_definition(grace);
        assert_eq!(references::plain_text(&segments), "Received by faith alone.");
        assert!(matches!(
            &segments[1],
            TextSegment::Link { target, .. } if target == "faith-alone"
        ));
    }

    #[test]
    fn test_feed_and_random_term() {
        let snapshot = CatalogSnapshot::new(sample_terms());
        let mut rng = StdRng::seed_from_u64(11);

        let queue = snapshot
            .feed(&HashMap::new(), &HashSet::new(), 3, Utc::now(), &mut rng)
            .unwrap();
        assert_eq!(queue.len(), 3);
        assert!(snapshot.random_term(&mut rng).is_some());
        assert!(CatalogSnapshot::default().random_term(&mut rng).is_none());
    }

    #[test]
    fn test_custom_terms_do_not_capture_references() {
        let mut custom = Term::new("custom-grace", "Grace");
        custom.short_definition = "My own note on grace.".to_string();
        let mut eternal = Term::new("eternal-security", "Eternal Security");
        eternal.see_also = vec!["Grace".to_string()];
        eternal.full_definition = "Rests on *grace.".to_string();

        let mut catalog = sample_terms();
        catalog.push(eternal);
        let snapshot = CatalogSnapshot::with_custom(catalog, vec![custom]);

        assert_eq!(snapshot.resolve("grace"), Some("grace"));
        assert_eq!(snapshot.resolve("Grace"), Some("grace"));

        let eternal = snapshot.get("eternal-security").unwrap();
        assert_eq!(snapshot.related(eternal)[0].target.as_deref(), Some("grace"));
        assert!(matches!(
            &snapshot.linked_definition(eternal)[1],
            TextSegment::Link { target, .. } if target == "grace"
        ));

        // Still listed, searchable and reachable by id
        assert_eq!(snapshot.len(), 6);
        assert_eq!(snapshot.get("custom-grace").map(|t| t.name.as_str()), Some("Grace"));
        assert!(snapshot.search("own note").iter().any(|t| t.id == "custom-grace"));
        // Only a custom term matches this name, and it is still not linkable
        let lone =
            CatalogSnapshot::with_custom(Vec::new(), vec![Term::new("custom-kenosis", "Kenosis")]);
        assert!(lone.resolve("Kenosis").is_none());
    }

    #[test]
    fn test_handle_swaps_snapshots() {
        let handle = CatalogHandle::new(sample_terms());
        let before = handle.current();

        handle.replace(vec![Term::new("zwingli-ulrich", "Zwingli, Ulrich (1484–1531)")]);
        let after = handle.current();

        // Old readers keep their view
        assert_eq!(before.len(), 4);
        assert!(before.resolve("Zwingli").is_none());
        assert_eq!(after.len(), 1);
        assert_eq!(after.resolve("Zwingli"), Some("zwingli-ulrich"));
    }
}
