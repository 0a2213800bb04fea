//! Type-safe CNY amount.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A payment amount in minor units (fen).
///
/// Stored in the smallest unit to avoid floating-point precision issues.
/// The hosted-checkout wire format wants major-unit strings with exactly
/// two decimal places ("12.34"), which [`Amount::to_major_string`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Amount(i64);

impl TryFrom<i64> for Amount {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_minor(value)
    }
}

impl Amount {
    /// Creates an Amount from minor units.
    pub fn from_minor(minor: i64) -> Result<Self, DomainError> {
        if minor < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self(minor))
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Renders the amount as a major-unit string with two decimals.
    pub fn to_major_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_major_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_creation() {
        let amount = Amount::from_minor(1050).unwrap();
        assert_eq!(amount.minor(), 1050);
    }

    #[test]
    fn test_negative_amount_fails() {
        let result = Amount::from_minor(-100);
        assert!(matches!(result, Err(DomainError::NegativeAmount)));
    }

    #[test]
    fn test_major_string() {
        assert_eq!(Amount::from_minor(1050).unwrap().to_major_string(), "10.50");
        assert_eq!(Amount::from_minor(5).unwrap().to_major_string(), "0.05");
        assert_eq!(Amount::from_minor(0).unwrap().to_major_string(), "0.00");
        assert_eq!(
            Amount::from_minor(123400).unwrap().to_major_string(),
            "1234.00"
        );
    }
}
