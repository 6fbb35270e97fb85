//! Random-key best-fit decoder.
//!
//! Maps a continuous priority vector (one key per item) to a discrete
//! bin assignment.
//!
//! # Algorithm
//!
//! 1. Compute the ordinal rank of every key (ties broken by index).
//! 2. Open one empty bin.
//! 3. For slot `i = 0..N`, take item `items[rank[i]]` together with key
//!    `keys[i]` and put it in the open bin that would be left with the
//!    smallest non-negative residual capacity (best fit, lowest bin index
//!    on ties). If no bin accepts it, open a new one.
//! 4. Concatenate the keys recorded per bin, in bin order, into the
//!    regrouped key vector.
//!
//! Decoding is deterministic and side-effect free. Random initial keys are
//! produced separately by [`random_keys`] from an explicit RNG.
//!
//! # Complexity
//! O(N log N + N * B) where B is the number of bins opened.
//!
//! # Reference
//! Bean (1994), "Genetic Algorithms and Random Keys for Sequencing and
//! Optimization"

use std::cmp::Ordering;

use rand::Rng;

use crate::error::{PackingError, Result};
use crate::models::{BinAssignment, PackingInstance};

/// Ordinal ranks of `keys`: `ranks[i]` is the 0-based position of `keys[i]`
/// in ascending order. Equal keys are ranked by index, so the earlier
/// index comes first.
pub fn rank_ordinal(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    // Stable sort keeps index order among equal keys
    order.sort_by(|&a, &b| key_cmp(keys[a], keys[b]));

    let mut ranks = vec![0; keys.len()];
    for (rank, &idx) in order.iter().enumerate() {
        ranks[idx] = rank;
    }
    ranks
}

fn key_cmp(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Decodes a priority vector into a best-fit bin assignment.
///
/// The returned assignment is unscored; see [`crate::fitness::evaluate`].
///
/// # Errors
/// - [`PackingError::KeyLengthMismatch`] if `keys.len() != instance.len()`.
/// - [`PackingError::InfeasibleItem`] if any item exceeds the capacity.
///   Checked before any placement.
pub fn decode(instance: &PackingInstance, keys: &[f64]) -> Result<BinAssignment> {
    let n = instance.len();
    if keys.len() != n {
        return Err(PackingError::KeyLengthMismatch {
            expected: n,
            actual: keys.len(),
        });
    }
    if let Some((index, weight)) = instance.first_oversized() {
        return Err(PackingError::InfeasibleItem {
            index,
            weight,
            capacity: instance.capacity,
        });
    }

    let capacity = instance.capacity;
    let ranks = rank_ordinal(keys);

    let mut bins: Vec<Vec<u64>> = vec![Vec::new()];
    let mut free: Vec<u64> = vec![capacity];
    let mut grouped: Vec<Vec<f64>> = vec![Vec::new()];

    for (slot, &rank) in ranks.iter().enumerate() {
        let item = instance.items[rank];
        let key = keys[slot];

        match best_fit(&free, item) {
            Some(b) => {
                bins[b].push(item);
                grouped[b].push(key);
                free[b] -= item;
            }
            None => {
                bins.push(vec![item]);
                grouped.push(vec![key]);
                free.push(capacity - item);
            }
        }
    }

    let keys = grouped.into_iter().flatten().collect();
    Ok(BinAssignment::new(bins, free, keys))
}

/// Index of the bin with the smallest residual after adding `item`.
fn best_fit(free: &[u64], item: u64) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, &cap) in free.iter().enumerate() {
        if cap < item {
            continue;
        }
        let residual = cap - item;
        match best {
            Some((_, r)) if r <= residual => {}
            _ => best = Some((idx, residual)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Draws `n` keys uniformly from `[0, range)`.
pub fn random_keys<R: Rng>(n: usize, range: f64, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| range * rng.random::<f64>()).collect()
}

/// Decodes a fresh uniformly random priority vector.
///
/// Used to seed the initial population.
pub fn decode_random<R: Rng>(
    instance: &PackingInstance,
    range: f64,
    rng: &mut R,
) -> Result<BinAssignment> {
    let keys = random_keys(instance.len(), range, rng);
    decode(instance, &keys)
}
