//! Error types for bin packing runs.
//!
//! Every failure is fatal to the run and is surfaced to the caller.
//! Nothing in the crate retries.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PackingError>;

/// Unified error type for instance loading, decoding, and search.
#[derive(Error, Debug)]
pub enum PackingError {
    /// Instance data is structurally wrong (count mismatch, non-positive
    /// capacity or weights, unparsable lines).
    #[error("malformed instance: {message}")]
    MalformedInstance { message: String },

    /// An item can never be placed because it exceeds the bin capacity.
    #[error("item {index} has weight {weight} which exceeds bin capacity {capacity}")]
    InfeasibleItem {
        index: usize,
        weight: u64,
        capacity: u64,
    },

    /// A priority vector does not have one key per item.
    #[error("priority vector has {actual} keys, expected {expected}")]
    KeyLengthMismatch { expected: usize, actual: usize },

    /// Run configuration rejected before search.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// I/O errors (instance file, report file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config or report errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PackingError {
    /// Creates a malformed-instance error.
    pub fn malformed(message: impl Into<String>) -> Self {
        PackingError::MalformedInstance {
            message: message.into(),
        }
    }

    /// Creates an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        PackingError::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PackingError::InfeasibleItem {
            index: 0,
            weight: 31,
            capacity: 30,
        };
        assert_eq!(
            err.to_string(),
            "item 0 has weight 31 which exceeds bin capacity 30"
        );

        let err = PackingError::malformed("expected 3 weights, found 2");
        assert_eq!(
            err.to_string(),
            "malformed instance: expected 3 weights, found 2"
        );
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            std::fs::read_to_string("/nonexistent/u-binpack/instance.bpp")?;
            Ok(())
        }
        assert!(matches!(open(), Err(PackingError::Io(_))));
    }
}
