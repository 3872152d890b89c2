//! The circuit key: the positive number a schedule shows in its key column.
//!
//! A key is unique within one grid at any instant. The engine relocates keys
//! between rows but never mints or retires them, so `parse` is the single
//! place where raw cell text becomes a key: blank, non-numeric, or
//! zero-valued text all read as "no key here".

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors returned when constructing keys from unchecked inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyError {
    Zero,
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Zero => write!(f, "circuit key must be positive"),
        }
    }
}

impl std::error::Error for KeyError {}

/// Positive circuit number, unique per grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CircuitKey(u32);

impl CircuitKey {
    /// Construct a key, panicking on zero.
    pub fn new(n: u32) -> Self {
        assert!(n > 0, "circuit key must be positive");
        Self(n)
    }

    /// Fallible constructor that reports zero rather than panicking.
    pub fn try_new(n: u32) -> Result<Self, KeyError> {
        if n == 0 {
            return Err(KeyError::Zero);
        }
        Ok(Self(n))
    }

    /// Parse the text of a key cell.
    ///
    /// Returns `None` for blank, non-numeric, or zero-valued text; a row
    /// whose key cell parses to `None` counts as empty.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(|n| Self::try_new(n).ok())
    }

    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CircuitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CircuitKey> for u32 {
    fn from(key: CircuitKey) -> Self {
        key.get()
    }
}

impl TryFrom<u32> for CircuitKey {
    type Error = KeyError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_numbers() {
        assert_eq!(CircuitKey::parse(" 12 "), Some(CircuitKey::new(12)));
        assert_eq!(CircuitKey::parse("1"), Some(CircuitKey::new(1)));
    }

    #[test]
    fn parse_rejects_blank_and_junk() {
        assert_eq!(CircuitKey::parse(""), None);
        assert_eq!(CircuitKey::parse("   "), None);
        assert_eq!(CircuitKey::parse("A-12"), None);
        assert_eq!(CircuitKey::parse("12.5"), None);
        assert_eq!(CircuitKey::parse("-3"), None);
        assert_eq!(CircuitKey::parse("0"), None);
    }

    #[test]
    fn try_new_rejects_zero() {
        assert_eq!(CircuitKey::try_new(0), Err(KeyError::Zero));
        assert!(CircuitKey::try_new(7).is_ok());
    }

    #[test]
    fn display_is_the_raw_number() {
        assert_eq!(CircuitKey::new(42).to_string(), "42");
    }

    #[test]
    fn keys_order_numerically() {
        let mut keys = vec![CircuitKey::new(10), CircuitKey::new(2)];
        keys.sort();
        assert_eq!(keys[0].get(), 2);
    }
}
