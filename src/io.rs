//! Instance file loading.
//!
//! # Format
//!
//! Line-based text:
//!
//! ```text
//! N          item count
//! C          bin capacity
//! w_1        one weight per line, N lines
//! ...
//! w_N
//! ```
//!
//! Blank lines and surrounding whitespace are ignored (benchmark files
//! often carry trailing blank lines).

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{PackingError, Result};
use crate::models::PackingInstance;

/// Parses an instance from its text form.
///
/// # Errors
/// - [`PackingError::MalformedInstance`] if a line is not an integer, the
///   count is negative, the capacity or a weight is not positive, or the
///   number of weight lines differs from the declared count.
/// - [`PackingError::InfeasibleItem`] if a weight exceeds the capacity.
///
/// # Example
/// ```
/// use u_binpack::io::parse_instance;
///
/// let inst = parse_instance("3\n10\n4\n6\n5\n").unwrap();
/// assert_eq!(inst.capacity, 10);
/// assert_eq!(inst.items, vec![4, 6, 5]);
/// ```
pub fn parse_instance(text: &str) -> Result<PackingInstance> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let count = match lines.next() {
        Some((line_no, raw)) => parse_integer(raw, line_no, "item count", 0)?,
        None => return Err(PackingError::malformed("empty instance file")),
    };
    let capacity = match lines.next() {
        Some((line_no, raw)) => parse_integer(raw, line_no, "bin capacity", 1)?,
        None => return Err(PackingError::malformed("missing bin capacity line")),
    };

    let mut items = Vec::with_capacity(count.min(1 << 16) as usize);
    for (line_no, raw) in lines {
        items.push(parse_integer(raw, line_no, "item weight", 1)?);
    }

    if items.len() as u64 != count {
        return Err(PackingError::malformed(format!(
            "declared {count} items but found {} weight lines",
            items.len()
        )));
    }

    let instance = PackingInstance::new(capacity, items);
    instance.validate()?;
    debug!(
        "Parsed instance: {} items, capacity {}",
        instance.len(),
        instance.capacity
    );
    Ok(instance)
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<PackingInstance> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_instance(&text)
}

fn parse_integer(raw: &str, line_no: usize, what: &str, min: i64) -> Result<u64> {
    let value: i64 = raw.parse().map_err(|_| {
        PackingError::malformed(format!("line {line_no}: {what} '{raw}' is not an integer"))
    })?;
    if value < min {
        return Err(PackingError::malformed(format!(
            "line {line_no}: {what} must be at least {min}, got {value}"
        )));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let inst = parse_instance("4\n30\n5\n14\n11\n8\n").unwrap();
        assert_eq!(inst, PackingInstance::new(30, vec![5, 14, 11, 8]));
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_blank_lines() {
        let inst = parse_instance("  2 \r\n 10\n\n 3\n7  \n\n").unwrap();
        assert_eq!(inst.items, vec![3, 7]);
        assert_eq!(inst.capacity, 10);
    }

    #[test]
    fn test_count_mismatch() {
        let err = parse_instance("3\n10\n1\n2\n").unwrap_err();
        assert!(matches!(err, PackingError::MalformedInstance { .. }));
        assert!(err.to_string().contains("declared 3 items"));

        let err = parse_instance("1\n10\n1\n2\n").unwrap_err();
        assert!(matches!(err, PackingError::MalformedInstance { .. }));
    }

    #[test]
    fn test_non_positive_values() {
        assert!(matches!(
            parse_instance("1\n0\n1\n"),
            Err(PackingError::MalformedInstance { .. })
        ));
        assert!(matches!(
            parse_instance("2\n10\n3\n-4\n"),
            Err(PackingError::MalformedInstance { .. })
        ));
        assert!(matches!(
            parse_instance("-1\n10\n"),
            Err(PackingError::MalformedInstance { .. })
        ));
    }

    #[test]
    fn test_zero_items_is_empty_instance() {
        let inst = parse_instance("0\n10\n").unwrap();
        assert!(inst.is_empty());
        assert_eq!(inst.capacity, 10);
    }

    #[test]
    fn test_not_an_integer() {
        let err = parse_instance("2\n10\n3\nabc\n").unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            parse_instance(""),
            Err(PackingError::MalformedInstance { .. })
        ));
        assert!(matches!(
            parse_instance("3\n"),
            Err(PackingError::MalformedInstance { .. })
        ));
    }

    #[test]
    fn test_infeasible_weight() {
        assert!(matches!(
            parse_instance("1\n30\n31\n"),
            Err(PackingError::InfeasibleItem { index: 0, .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_instance("/nonexistent/u-binpack/HARD2.BPP"),
            Err(PackingError::Io(_))
        ));
    }
}
