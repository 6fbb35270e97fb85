//! Input validation for bin packing instances.
//!
//! Checks structural integrity of an instance before any search begins.
//! Detects:
//! - Zero bin capacity
//! - Zero-weight items
//! - Items heavier than the bin capacity (never placeable)
//!
//! All issues are collected rather than stopping at the first one.

use crate::models::PackingInstance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Bin capacity is zero.
    ZeroCapacity,
    /// An item has zero weight.
    ZeroWeight,
    /// An item is heavier than the bin capacity.
    InfeasibleItem,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a packing instance.
///
/// Checks:
/// 1. Capacity is positive
/// 2. Every item weight is positive
/// 3. Every item weight is at most the capacity
///
/// An empty item list is valid (it packs into a single empty bin).
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &PackingInstance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.capacity == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroCapacity,
            "Bin capacity must be positive",
        ));
    }

    for (idx, &weight) in instance.items.iter().enumerate() {
        if weight == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroWeight,
                format!("Item {idx} has zero weight"),
            ));
        } else if instance.capacity > 0 && weight > instance.capacity {
            errors.push(ValidationError::new(
                ValidationErrorKind::InfeasibleItem,
                format!(
                    "Item {idx} weight {weight} exceeds bin capacity {}",
                    instance.capacity
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
