//! Exact fractional weights.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{FolioError, FolioResult};

/// Most decimal places a weight, or a product of weights, can carry.
pub const MAX_SCALE: u32 = 28;

/// A share of a parent allocation, in the half-open range (0, 1].
///
/// Weights are base-10 decimals so that a set of sibling weights can be
/// checked to sum to exactly one. The scale of the source text is kept for
/// display (`0.50` prints as `0.50`), while equality and hashing are numeric.
///
/// # Example
///
/// ```rust
/// use folio_core::types::Weight;
/// use rust_decimal_macros::dec;
///
/// let w: Weight = "0.25".parse().unwrap();
/// assert_eq!(w.as_decimal(), dec!(0.25));
/// assert_eq!(w.as_percentage(), dec!(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weight(Decimal);

impl Weight {
    /// The full weight.
    pub const ONE: Weight = Weight(Decimal::ONE);

    /// Creates a weight, rejecting values outside (0, 1].
    ///
    /// # Errors
    ///
    /// Returns `FolioError::InvalidWeight` if the value is not positive or
    /// exceeds one.
    pub fn new(value: Decimal) -> FolioResult<Self> {
        if value <= Decimal::ZERO {
            return Err(FolioError::invalid_weight(
                value.to_string(),
                "weight must be positive",
            ));
        }
        if value > Decimal::ONE {
            return Err(FolioError::invalid_weight(
                value.to_string(),
                "weight must not exceed 1",
            ));
        }
        Ok(Self(value))
    }

    /// Parses a weight from decimal or scientific text.
    ///
    /// Text that cannot be represented exactly is rejected rather than rounded.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::InvalidWeight` for non-numeric text or a value
    /// outside (0, 1].
    pub fn parse(text: &str) -> FolioResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(FolioError::invalid_weight(text, "empty weight"));
        }

        let value = if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed).map_err(|e| match e {
                rust_decimal::Error::ScaleExceedsMaximumPrecision(_) => too_precise(text),
                other => FolioError::invalid_weight(text, other.to_string()),
            })
        } else {
            Decimal::from_str_exact(trimmed).map_err(|e| {
                // Well-formed text that only parses with rounding.
                if Decimal::from_str(trimmed).is_ok() {
                    too_precise(text)
                } else {
                    FolioError::invalid_weight(text, e.to_string())
                }
            })
        }?;

        Self::new(value)
    }

    /// Returns the weight as a decimal fraction.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns the weight as a percentage (0.25 = 25%).
    #[must_use]
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// Returns true for a weight of exactly one.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0 == Decimal::ONE
    }

    /// Decimal places needed to write the weight exactly, ignoring
    /// trailing zeros (`0.250` needs 2).
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.0.normalize().scale()
    }

    /// Exact product of two weights.
    ///
    /// Returns `None` when the product needs more than [`MAX_SCALE`]
    /// decimal places, where the decimal type would round it.
    #[must_use]
    pub fn checked_mul(self, rhs: Weight) -> Option<Weight> {
        if self.scale() + rhs.scale() > MAX_SCALE {
            return None;
        }
        Some(Weight(self.0 * rhs.0))
    }

    /// Product of two weights on a path of a constructed tree.
    ///
    /// `Allocation::new` rejects trees whose path products exceed
    /// [`MAX_SCALE`], so the product here is exact and non-zero.
    pub(crate) fn mul_on_path(self, rhs: Weight) -> Weight {
        debug_assert!(self.scale() + rhs.scale() <= MAX_SCALE);
        Weight(self.0 * rhs.0)
    }
}

fn too_precise(text: &str) -> FolioError {
    FolioError::invalid_weight(
        text,
        format!(
            "more than {} decimal places cannot be represented exactly",
            MAX_SCALE
        ),
    )
}

/// Exact sum of a sequence of weights.
///
/// The result is a plain decimal since sibling sums may leave (0, 1].
pub fn total<'a>(weights: impl IntoIterator<Item = &'a Weight>) -> Decimal {
    weights.into_iter().map(Weight::as_decimal).sum()
}

impl FromStr for Weight {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Weight {
    type Error = FolioError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for Decimal {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_decimal() {
        let w = Weight::parse("0.125").unwrap();
        assert_eq!(w.as_decimal(), dec!(0.125));

        let w = Weight::parse(" 1 ").unwrap();
        assert!(w.is_full());
    }

    #[test]
    fn test_parse_scientific() {
        let w = Weight::parse("2.5e-1").unwrap();
        assert_eq!(w.as_decimal(), dec!(0.25));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for text in ["", "abc", "0.5%", "one", "NaN"] {
            let err = Weight::parse(text).unwrap_err();
            assert!(
                matches!(err, FolioError::InvalidWeight { .. }),
                "expected InvalidWeight for {:?}, got {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_range() {
        assert!(Weight::new(dec!(0)).is_err());
        assert!(Weight::new(dec!(-0.5)).is_err());
        assert!(Weight::new(dec!(1.0001)).is_err());
        assert!(Weight::new(dec!(0.0000001)).is_ok());
        assert!(Weight::new(dec!(1)).is_ok());
    }

    #[test]
    fn test_display_keeps_scale() {
        let w = Weight::parse("0.50").unwrap();
        assert_eq!(w.to_string(), "0.50");
        assert_eq!(w, Weight::parse("0.5").unwrap());
    }

    #[test]
    fn test_checked_mul_is_exact() {
        let a = Weight::parse("0.1").unwrap();
        let b = Weight::parse("0.3").unwrap();
        assert_eq!(a.checked_mul(b).unwrap().as_decimal(), dec!(0.03));

        let tiny = Weight::parse("0.00000000000001").unwrap();
        let product = tiny.checked_mul(tiny).unwrap();
        assert_eq!(product.as_decimal(), Decimal::new(1, 28));
        assert!(product.as_decimal() > Decimal::ZERO);
    }

    #[test]
    fn test_checked_mul_refuses_rounding() {
        let tiny = Weight::parse("0.000000000000001").unwrap();
        assert_eq!(tiny.scale(), 15);
        assert!(tiny.checked_mul(tiny).is_none());

        let near_one = Weight::parse("0.999999999999999").unwrap();
        assert!(tiny.checked_mul(near_one).is_none());
    }

    #[test]
    fn test_scale_ignores_trailing_zeros() {
        assert_eq!(Weight::parse("0.250").unwrap().scale(), 2);
        assert_eq!(Weight::parse("1.000").unwrap().scale(), 0);
    }

    #[test]
    fn test_parse_too_precise() {
        let err = Weight::parse("0.00000000000000000000000000001").unwrap_err();
        match err {
            FolioError::InvalidWeight { reason, .. } => {
                assert!(reason.contains("more than 28 decimal places"), "{}", reason);
            }
            other => panic!("expected InvalidWeight, got {:?}", other),
        }

        let err = Weight::parse("abc").unwrap_err();
        assert!(!err.to_string().contains("decimal places"));
    }

    #[test]
    fn test_total() {
        let weights = [
            Weight::parse("0.1").unwrap(),
            Weight::parse("0.2").unwrap(),
            Weight::parse("0.7").unwrap(),
        ];
        assert_eq!(total(&weights), Decimal::ONE);
    }

    #[test]
    fn test_serde_as_string() {
        let w = Weight::parse("0.35").unwrap();
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "\"0.35\"");

        let back: Weight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);

        assert!(serde_json::from_str::<Weight>("\"1.5\"").is_err());
    }
}
