//! Bangladeshi mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
///
/// Each variant names the specific rule that was violated so it can be shown
/// to the customer as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input is empty.
    #[error("Phone number is required")]
    Empty,
    /// The input contains something other than digits.
    #[error("Phone number must contain only digits")]
    NonDigit,
    /// The number does not start with `01`.
    #[error("Phone number must start with 01")]
    MissingPrefix,
    /// The third digit is not a known operator code.
    #[error("Invalid operator code (must be 013-019)")]
    InvalidOperatorCode,
    /// The number is not exactly 11 digits.
    #[error("Phone number must be {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
}

/// A validated local mobile number: 11 digits, `01` followed by an operator
/// digit in `3..=9`.
///
/// Spaces and dashes are accepted as separators and stripped.
///
/// ## Examples
///
/// ```
/// use shilpini_core::Phone;
///
/// assert!(Phone::parse("01712345678").is_ok());
/// assert!(Phone::parse("017-1234-5678").is_ok());
///
/// assert!(Phone::parse("2712345678").is_err()); // wrong prefix
/// assert!(Phone::parse("017123").is_err());     // too short
/// assert!(Phone::parse("01212345678").is_err()); // unknown operator
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a local mobile number.
    pub const LENGTH: usize = 11;

    /// Parse a `Phone` from user input.
    ///
    /// Rules are checked in order: digits only, `01` prefix, operator code,
    /// then length, so the first violated rule is the one reported.
    ///
    /// # Errors
    ///
    /// Returns the [`PhoneError`] for the first rule the input violates.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if !digits.starts_with("01") {
            return Err(PhoneError::MissingPrefix);
        }

        if let Some(operator) = digits.as_bytes().get(2)
            && !(b'3'..=b'9').contains(operator)
        {
            return Err(PhoneError::InvalidOperatorCode);
        }

        if digits.len() != Self::LENGTH {
            return Err(PhoneError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the normalized number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
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

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_numbers() {
        assert!(Phone::parse("01712345678").is_ok());
        assert!(Phone::parse("01312345678").is_ok());
        assert!(Phone::parse("01912345678").is_ok());
    }

    #[test]
    fn test_strips_separators() {
        let phone = Phone::parse(" 0171-234 5678 ").unwrap();
        assert_eq!(phone.as_str(), "01712345678");
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        assert_eq!(Phone::parse("2712345678"), Err(PhoneError::MissingPrefix));
    }

    #[test]
    fn test_rejects_too_short() {
        assert_eq!(
            Phone::parse("017123"),
            Err(PhoneError::WrongLength { expected: 11 })
        );
    }

    #[test]
    fn test_rejects_too_long() {
        assert!(matches!(
            Phone::parse("017123456789"),
            Err(PhoneError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_operator() {
        assert_eq!(
            Phone::parse("01212345678"),
            Err(PhoneError::InvalidOperatorCode)
        );
    }

    #[test]
    fn test_rejects_letters_and_empty() {
        assert_eq!(Phone::parse("0171234567a"), Err(PhoneError::NonDigit));
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            PhoneError::MissingPrefix.to_string(),
            "Phone number must start with 01"
        );
        assert_eq!(
            PhoneError::WrongLength { expected: 11 }.to_string(),
            "Phone number must be 11 digits"
        );
    }
}
