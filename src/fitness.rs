//! Packing-efficiency fitness.
//!
//! # Formula
//!
//! For each bin, `u = (C - free) / C` is its fill ratio. Then
//!
//! ```text
//! score = 1 - (Σ u²) / bins
//! ```
//!
//! Lower is better: fuller bins push the mean squared fill toward 1 and
//! the score toward 0. For any feasible non-empty assignment the score
//! lies in `[0, 1)`.
//!
//! # Reference
//! Falkenauer & Delchambre (1992), "A genetic algorithm for bin packing
//! and line balancing" (squared-fill objective)

use crate::models::BinAssignment;

/// Score of an assignment that has not been evaluated, or that holds no
/// items and therefore has no meaningful score.
pub const UNSCORED: f64 = f64::INFINITY;

/// Computes the packing score of an assignment.
///
/// Returns [`UNSCORED`] when the assignment contains no items or the
/// capacity is zero.
pub fn score(assignment: &BinAssignment, capacity: u64) -> f64 {
    let bins = assignment.free_capacities.len();
    if bins == 0 || capacity == 0 || assignment.item_count() == 0 {
        return UNSCORED;
    }

    let cap = capacity as f64;
    let sum_sq: f64 = assignment
        .free_capacities
        .iter()
        .map(|&free| {
            let u = (cap - free as f64) / cap;
            u * u
        })
        .sum();

    1.0 - sum_sq / bins as f64
}

/// Scores an assignment in place and returns the score.
pub fn evaluate(assignment: &mut BinAssignment, capacity: u64) -> f64 {
    let s = score(assignment, capacity);
    assignment.score = s;
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder;
    use crate::models::PackingInstance;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_perfect_packing_scores_zero() {
        let a = BinAssignment::new(vec![vec![10], vec![4, 6]], vec![0, 0], vec![0.0, 1.0, 2.0]);
        assert_eq!(score(&a, 10), 0.0);
    }

    #[test]
    fn test_known_value() {
        // fills 1.0 and 0.5 -> 1 - (1 + 0.25) / 2
        let a = BinAssignment::new(vec![vec![10], vec![5]], vec![0, 5], vec![0.0, 1.0]);
        assert!((score(&a, 10) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_fewer_fuller_bins_score_lower() {
        let tight = BinAssignment::new(vec![vec![6, 4]], vec![0], vec![0.0, 1.0]);
        let loose = BinAssignment::new(vec![vec![6], vec![4]], vec![4, 6], vec![0.0, 1.0]);
        assert!(score(&tight, 10) < score(&loose, 10));
    }

    #[test]
    fn test_empty_assignment_unscored() {
        let a = BinAssignment::new(vec![vec![]], vec![30], vec![]);
        assert_eq!(score(&a, 30), UNSCORED);
    }

    #[test]
    fn test_evaluate_sets_score() {
        let mut a = BinAssignment::new(vec![vec![5]], vec![5], vec![0.0]);
        assert!(!a.is_scored());
        let s = evaluate(&mut a, 10);
        assert!(a.is_scored());
        assert_eq!(a.score, s);
        assert!((s - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_random_packings_score_in_unit_range() {
        let inst = PackingInstance::new(
            30,
            vec![5, 14, 11, 8, 3, 2, 13, 1, 5, 6, 9, 4, 7, 12, 10, 15, 30, 1],
        );
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut a = decoder::decode_random(&inst, 5.0, &mut rng).unwrap();
            let s = evaluate(&mut a, inst.capacity);
            assert!((0.0..1.0).contains(&s), "score {s} out of range");
        }
    }
}
