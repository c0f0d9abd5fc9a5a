//! Recency-weighted feed generation
//!
//! Not a spaced repetition scheduler: each term gets a weight from how long
//! ago it was last shown, and the queue is drawn by weighted random sampling
//! without replacement.
//!
//! Weights:
//! - never seen: 1.0
//! - seen 7+ days ago: 2.0
//! - seen less than a day ago: 0.3
//! - otherwise: max(0.3, days / 14)
//! - saved terms: weight × 1.5

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::models::{ExposureRecord, FeedError, Result, WeightedCandidate};
use crate::catalog::Term;

const MS_PER_DAY: f64 = 86_400_000.0;

const UNSEEN_WEIGHT: f64 = 1.0;
const STALE_AFTER_DAYS: f64 = 7.0;
const STALE_WEIGHT: f64 = 2.0;
const RECENT_WITHIN_DAYS: f64 = 1.0;
const MIN_WEIGHT: f64 = 0.3;
const RAMP_DAYS: f64 = 14.0;
const SAVED_MULTIPLIER: f64 = 1.5;

/// Default queue length when the caller has no preference
pub const DEFAULT_QUEUE_SIZE: usize = 50;

/// Clamp a signed request size to a usable count; negatives become zero
pub fn clamp_count(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

/// Fractional days between `last_seen` and `now`
fn days_since(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - last_seen).num_milliseconds() as f64 / MS_PER_DAY
}

/// Weight for a single term
pub fn term_weight(exposure: Option<&ExposureRecord>, saved: bool, now: DateTime<Utc>) -> f64 {
    let base = match exposure.and_then(|e| e.last_seen_at) {
        None => UNSEEN_WEIGHT,
        Some(last_seen) => {
            let days = days_since(last_seen, now);
            if days >= STALE_AFTER_DAYS {
                STALE_WEIGHT
            } else if days < RECENT_WITHIN_DAYS {
                MIN_WEIGHT
            } else {
                MIN_WEIGHT.max(days / RAMP_DAYS)
            }
        }
    };

    if saved {
        base * SAVED_MULTIPLIER
    } else {
        base
    }
}

/// Pair every term with its weight, keeping catalog order
pub fn weigh_terms<'a>(
    terms: &'a [Term],
    exposures: &HashMap<String, ExposureRecord>,
    saved_ids: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<WeightedCandidate<'a>> {
    terms
        .iter()
        .map(|term| WeightedCandidate {
            term,
            weight: term_weight(exposures.get(&term.id), saved_ids.contains(&term.id), now),
        })
        .collect()
}

/// Draw up to `count` distinct terms, each pick proportional to its weight
/// among the candidates still in the pool
pub fn sample_without_replacement<'a, R: Rng + ?Sized>(
    mut pool: Vec<WeightedCandidate<'a>>,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Term> {
    let limit = count.min(pool.len());
    let mut selected = Vec::with_capacity(limit);

    for _ in 0..limit {
        let mut total_weight: f64 = pool.iter().map(|c| c.weight).sum();
        if total_weight <= 0.0 || !total_weight.is_finite() {
            log::warn!("Degenerate feed weights (total {}), sampling uniformly", total_weight);
            for candidate in pool.iter_mut() {
                candidate.weight = 1.0;
            }
            total_weight = pool.len() as f64;
        }

        let target = rng.gen::<f64>() * total_weight;
        let chosen = select_index(&pool, target);
        selected.push(pool.remove(chosen).term);
    }

    selected
}

/// Index of the candidate whose cumulative weight first reaches `target`.
/// `pool` must not be empty.
fn select_index(pool: &[WeightedCandidate<'_>], target: f64) -> usize {
    let mut remainder = target;
    for (i, candidate) in pool.iter().enumerate() {
        remainder -= candidate.weight;
        if remainder <= 0.0 {
            return i;
        }
    }

    // Rounding can leave a sliver of remainder after the scan; take the last item
    pool.len() - 1
}

/// Build a feed queue at `now` using the given random source
///
/// Returns `min(count, terms.len())` distinct terms. An empty catalog is an
/// error even when `count` is zero.
pub fn generate_queue_with<'a, R: Rng + ?Sized>(
    terms: &'a [Term],
    exposures: &HashMap<String, ExposureRecord>,
    saved_ids: &HashSet<String>,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<&'a Term>> {
    if terms.is_empty() {
        return Err(FeedError::EmptyCatalog);
    }

    let pool = weigh_terms(terms, exposures, saved_ids, now);
    let queue = sample_without_replacement(pool, count, rng);

    log::debug!("Generated feed of {} from {} terms", queue.len(), terms.len());
    Ok(queue)
}

/// Build a feed queue for the current time with thread-local randomness
pub fn generate_queue<'a>(
    terms: &'a [Term],
    exposures: &HashMap<String, ExposureRecord>,
    saved_ids: &HashSet<String>,
    count: usize,
) -> Result<Vec<&'a Term>> {
    generate_queue_with(
        terms,
        exposures,
        saved_ids,
        count,
        Utc::now(),
        &mut rand::thread_rng(),
    )
}

/// Build a reproducible feed queue: the same seed, inputs and `now` always
/// give the same order
pub fn generate_queue_seeded<'a>(
    terms: &'a [Term],
    exposures: &HashMap<String, ExposureRecord>,
    saved_ids: &HashSet<String>,
    count: usize,
    now: DateTime<Utc>,
    seed: u64,
) -> Result<Vec<&'a Term>> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_queue_with(terms, exposures, saved_ids, count, now, &mut rng)
}
