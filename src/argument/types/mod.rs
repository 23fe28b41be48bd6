//! Built-in [`crate::ArgType`] implementations.
//!
//! All of them are platform agnostic. Implement [`crate::ArgType`] yourself for anything that
//! needs to look up Discord entities.

mod boolean;
pub use boolean::*;

mod choice;
pub use choice::*;

mod code;
pub use code::*;

mod duration;
pub use duration::*;

mod link;
pub use link::*;

mod number;
pub use number::*;

mod text;
pub use text::*;

/// Error thrown when a value lies outside of the configured bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfRange {
    /// Lower bound, formatted
    pub min: Option<String>,
    /// Upper bound, formatted
    pub max: Option<String>,
}

impl OutOfRange {
    /// Creates the error from any displayable bounds
    pub fn new<T: std::fmt::Display>(min: Option<T>, max: Option<T>) -> Self {
        Self {
            min: min.map(|x| x.to_string()),
            max: max.map(|x| x.to_string()),
        }
    }
}

impl std::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => write!(f, "must be between {} and {}", min, max),
            (Some(min), None) => write!(f, "must be at least {}", min),
            (None, Some(max)) => write!(f, "must be at most {}", max),
            (None, None) => f.write_str("is out of range"),
        }
    }
}

impl std::error::Error for OutOfRange {}

/// Checks `min <= value <= max` for the bounds that are set
fn check_range<T: PartialOrd + std::fmt::Display + Copy>(
    value: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), OutOfRange> {
    let too_small = min.map_or(false, |min| value < min);
    let too_large = max.map_or(false, |max| value > max);
    if too_small || too_large {
        Err(OutOfRange::new(min, max))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[test]
fn test_check_range() {
    assert!(check_range(5, Some(1), Some(10)).is_ok());
    assert!(check_range(1, Some(1), None).is_ok());
    assert_eq!(
        check_range(0, Some(1), Some(10)).unwrap_err().to_string(),
        "must be between 1 and 10"
    );
    assert_eq!(
        check_range(11, None, Some(10)).unwrap_err().to_string(),
        "must be at most 10"
    );
}
