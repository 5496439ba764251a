//! Fixed-point monetary amount with 2 decimal places.
//!
//! Uses `rust_decimal` internally. Amounts with more precision than 2 decimal
//! places are rejected rather than rounded, so a receipt always shows the
//! amount that was entered.

use crate::error::GatewayError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A strictly positive amount kept at exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use payment_gateway::Amount;
///
/// let amount = Amount::from_str("199").unwrap();
/// assert_eq!(amount.to_string(), "199.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Creates an `Amount` at 2 decimal places.
    ///
    /// Fails when the value is zero or negative, or carries more than 2
    /// significant decimal places. Values are never rounded.
    pub fn new(value: Decimal) -> Result<Self, GatewayError> {
        let reject = |reason: &str| GatewayError::InvalidAmount {
            input: value.to_string(),
            reason: reason.to_string(),
        };

        if value <= Decimal::ZERO {
            return Err(reject("amount must be positive"));
        }

        let mut normalized = value.normalize();
        if normalized.scale() > Self::SCALE {
            return Err(reject("amount has more than 2 decimal places"));
        }

        normalized.rescale(Self::SCALE);
        Ok(Amount(normalized))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = |reason: String| GatewayError::InvalidAmount {
            input: trimmed.to_string(),
            reason,
        };

        let decimal = Decimal::from_str(trimmed).map_err(|e| invalid(e.to_string()))?;

        Amount::new(decimal).map_err(|e| match e {
            GatewayError::InvalidAmount { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        assert_eq!(Amount::from_str("199").unwrap().to_string(), "199.00");
        assert_eq!(Amount::from_str("199.0").unwrap().to_string(), "199.00");
        assert_eq!(Amount::from_str("10.5").unwrap().to_string(), "10.50");
        assert_eq!(Amount::from_str("  2.25  ").unwrap().to_string(), "2.25");
    }

    #[test]
    fn test_rejects_non_numeric_input() {
        for input in ["abc", "", "12,5", "NaN", "inf", "1.2.3"] {
            assert!(
                matches!(
                    Amount::from_str(input),
                    Err(GatewayError::InvalidAmount { .. })
                ),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(Amount::from_str("0").is_err());
        assert!(Amount::from_str("0.00").is_err());
        assert!(Amount::from_str("-5").is_err());
    }

    #[test]
    fn test_rejects_extra_decimal_places_instead_of_rounding() {
        for input in ["10.555", "0.005", "0.004", "1.001"] {
            match Amount::from_str(input) {
                Err(GatewayError::InvalidAmount { input: got, reason }) => {
                    assert_eq!(got, input);
                    assert!(reason.contains("decimal places"), "reason: {}", reason);
                }
                other => panic!("expected {:?} to be rejected, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_keeps_entered_value() {
        let amount = Amount::from_str("0.01").unwrap();
        assert_eq!(amount.value(), Decimal::new(1, 2));
        assert_eq!(amount.to_string(), "0.01");

        // Trailing zeros are not extra precision
        let amount = Amount::from_str("10.500").unwrap();
        assert_eq!(amount.value(), Decimal::new(1050, 2));
        assert_eq!(amount.to_string(), "10.50");
    }

    #[test]
    fn test_error_message_names_input() {
        let err = Amount::from_str("ten").unwrap_err();
        assert!(err.to_string().contains("'ten'"));
    }
}
