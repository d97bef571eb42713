//! Bounds policy for accepted transaction amounts.
//!
//! The minimum and maximum are deliberately a configurable policy rather than
//! hardcoded constants: every bound check in the amount engine goes through an
//! [`AmountPolicy`] value.

use rust_decimal::Decimal;

/// Bounds accepted for an amount committed to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountPolicy {
    /// Smallest accepted amount (inclusive).
    pub min: Decimal,
    /// Largest accepted amount (inclusive).
    pub max: Decimal,
}

impl Default for AmountPolicy {
    /// The permissive default: 0.01 through 999,999,999.99.
    fn default() -> Self {
        Self {
            min: Decimal::new(1, 2),
            max: Decimal::new(99_999_999_999, 2),
        }
    }
}

impl AmountPolicy {
    /// Create a policy with explicit bounds.
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Check whether a value lies within the accepted range.
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check whether a magnitude is representable at all, ignoring the minimum.
    ///
    /// Used for intermediate arithmetic results, which may legitimately be
    /// zero or negative before the final commit.
    #[must_use]
    pub fn in_magnitude(&self, value: Decimal) -> bool {
        value.abs() <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_bounds() {
        let policy = AmountPolicy::default();
        assert_eq!(policy.min, dec!(0.01));
        assert_eq!(policy.max, dec!(999999999.99));
    }

    #[test]
    fn test_contains() {
        let policy = AmountPolicy::default();
        assert!(policy.contains(dec!(0.01)));
        assert!(policy.contains(dec!(999999999.99)));
        assert!(!policy.contains(dec!(0.00)));
        assert!(!policy.contains(dec!(1000000000.00)));
    }

    #[test]
    fn test_in_magnitude_allows_negatives() {
        let policy = AmountPolicy::default();
        assert!(policy.in_magnitude(dec!(-5.00)));
        assert!(policy.in_magnitude(dec!(0)));
        assert!(!policy.in_magnitude(dec!(-1000000000.00)));
    }

    #[test]
    fn test_custom_bounds() {
        let policy = AmountPolicy::new(dec!(1.00), dec!(999999.99));
        assert!(!policy.contains(dec!(0.50)));
        assert!(policy.contains(dec!(1.00)));
        assert!(!policy.contains(dec!(1000000.00)));
    }
}
