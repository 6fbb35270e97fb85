//! Bin packing instance model.
//!
//! An instance is a bin capacity plus an ordered sequence of item weights.
//! Item order matters: index `i` is the axis along which priority
//! vectors are encoded.

use serde::{Deserialize, Serialize};

use crate::error::{PackingError, Result};
use crate::validation::{self, ValidationErrorKind};

/// A one-dimensional bin packing instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingInstance {
    /// Capacity of every bin.
    pub capacity: u64,
    /// Item weights, indexed `0..N`.
    pub items: Vec<u64>,
}

impl PackingInstance {
    /// Creates an instance without validating it.
    ///
    /// Use [`PackingInstance::validate`] (or [`PackingInstance::checked`])
    /// before handing it to the search.
    pub fn new(capacity: u64, items: Vec<u64>) -> Self {
        Self { capacity, items }
    }

    /// Creates an instance and rejects it if it is not packable.
    pub fn checked(capacity: u64, items: Vec<u64>) -> Result<Self> {
        let instance = Self::new(capacity, items);
        instance.validate()?;
        Ok(instance)
    }

    /// Number of items (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the instance has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item weights.
    pub fn total_weight(&self) -> u64 {
        self.items.iter().sum()
    }

    /// L1 lower bound on the number of bins: `ceil(total_weight / capacity)`.
    ///
    /// Returns 0 for an empty instance or zero capacity.
    pub fn lower_bound(&self) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        self.total_weight().div_ceil(self.capacity) as usize
    }

    /// First item heavier than the capacity, as `(index, weight)`.
    pub fn first_oversized(&self) -> Option<(usize, u64)> {
        self.items
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, w)| w > self.capacity)
    }

    /// Validates the instance, folding every detected issue into one error.
    ///
    /// An instance whose only problems are oversized items is reported as
    /// [`PackingError::InfeasibleItem`] (first offending item); anything
    /// else is [`PackingError::MalformedInstance`].
    pub fn validate(&self) -> Result<()> {
        let errors = match validation::validate_instance(self) {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };

        let only_infeasible = errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InfeasibleItem);
        if only_infeasible {
            if let Some((index, weight)) = self.first_oversized() {
                return Err(PackingError::InfeasibleItem {
                    index,
                    weight,
                    capacity: self.capacity,
                });
            }
        }

        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(PackingError::malformed(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_quantities() {
        let inst = PackingInstance::new(30, vec![5, 14, 11, 8]);
        assert_eq!(inst.len(), 4);
        assert!(!inst.is_empty());
        assert_eq!(inst.total_weight(), 38);
        assert_eq!(inst.lower_bound(), 2);
    }

    #[test]
    fn test_lower_bound_exact_multiple() {
        let inst = PackingInstance::new(10, vec![5, 5, 10]);
        assert_eq!(inst.lower_bound(), 2);
        assert_eq!(PackingInstance::new(10, vec![]).lower_bound(), 0);
    }

    #[test]
    fn test_validate_infeasible_item() {
        let inst = PackingInstance::new(30, vec![10, 31, 40]);
        match inst.validate() {
            Err(PackingError::InfeasibleItem {
                index,
                weight,
                capacity,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(weight, 31);
                assert_eq!(capacity, 30);
            }
            other => panic!("expected InfeasibleItem, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_malformed() {
        let inst = PackingInstance::new(0, vec![1, 2]);
        assert!(matches!(
            inst.validate(),
            Err(PackingError::MalformedInstance { .. })
        ));

        let inst = PackingInstance::new(10, vec![3, 0]);
        assert!(matches!(
            inst.validate(),
            Err(PackingError::MalformedInstance { .. })
        ));
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let inst = PackingInstance::checked(30, vec![]).unwrap();
        assert!(inst.is_empty());
    }
}
