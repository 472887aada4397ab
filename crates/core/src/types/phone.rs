//! Mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone cannot be empty")]
    Empty,
    /// The input is not exactly nine digits.
    #[error("phone must be exactly {digits} digits")]
    InvalidFormat {
        /// Required number of digits.
        digits: usize,
    },
}

/// A Peruvian mobile number: exactly nine ASCII digits, no separators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a mobile number.
    pub const DIGITS: usize = 9;

    /// Parse a `Phone` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or is not exactly
    /// nine ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if s.len() != Self::DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::InvalidFormat {
                digits: Self::DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("987654321").is_ok());
        assert!(Phone::parse(" 912345678 ").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            Phone::parse("98765432"),
            Err(PhoneError::InvalidFormat { digits: 9 })
        ));
        assert!(Phone::parse("9876543210").is_err());
    }

    #[test]
    fn test_parse_non_digits() {
        assert!(Phone::parse("98765432a").is_err());
        assert!(Phone::parse("987-65432").is_err());
        // Full-width digits are not ASCII
        assert!(Phone::parse("９８７６５４３２１").is_err());
    }
}
