//! Exact decimal monetary values.
//!
//! A [`DecimalAmount`] is the fundamental unit of value in tally: an exact
//! base-10 quantity with a canonical 2-decimal-place form. All arithmetic is
//! performed in [`Decimal`] and rounded half-up to 2 places after every
//! operation; binary floating point never touches the money path.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::policy::AmountPolicy;

/// Round a decimal half-up (away from zero) to 2 places.
///
/// This is the single rounding mode used throughout the engine.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// An error from an arithmetic operation on amounts.
///
/// Both variants are recoverable: the caller's operands are left untouched
/// and the user can correct the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The divisor was exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The result magnitude exceeds the representable maximum.
    #[error("amount exceeds the maximum")]
    Overflow,
}

/// An exact monetary quantity with a canonical 2-decimal-place form.
///
/// Stored transaction amounts are non-negative; the income/expense direction
/// is carried by the transaction kind, not by the sign of the amount.
/// Intermediate calculator results may be negative.
///
/// # Examples
///
/// ```
/// use tally_core::{AmountPolicy, DecimalAmount};
/// use rust_decimal_macros::dec;
///
/// let policy = AmountPolicy::default();
/// let a = DecimalAmount::from_decimal(dec!(10.00));
/// let b = DecimalAmount::from_decimal(dec!(3));
///
/// let third = a.checked_div(&b, &policy).unwrap();
/// assert_eq!(third.to_canonical_string(), "3.33");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DecimalAmount(Decimal);

impl DecimalAmount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal, rounding half-up to 2 places.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Self {
        Self(round2(value))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Check if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add, rounding the result half-up to 2 places.
    pub fn checked_add(&self, other: &Self, policy: &AmountPolicy) -> Result<Self, ArithmeticError> {
        let sum = self.0.checked_add(other.0).ok_or(ArithmeticError::Overflow)?;
        Self::bounded(sum, policy)
    }

    /// Subtract, rounding the result half-up to 2 places.
    pub fn checked_sub(&self, other: &Self, policy: &AmountPolicy) -> Result<Self, ArithmeticError> {
        let diff = self.0.checked_sub(other.0).ok_or(ArithmeticError::Overflow)?;
        Self::bounded(diff, policy)
    }

    /// Multiply, rounding the result half-up to 2 places.
    pub fn checked_mul(&self, other: &Self, policy: &AmountPolicy) -> Result<Self, ArithmeticError> {
        let product = self.0.checked_mul(other.0).ok_or(ArithmeticError::Overflow)?;
        Self::bounded(product, policy)
    }

    /// Divide, rounding the result half-up to 2 places.
    ///
    /// A divisor of exactly zero is an error, never a silent coercion.
    pub fn checked_div(&self, other: &Self, policy: &AmountPolicy) -> Result<Self, ArithmeticError> {
        if other.0.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let quotient = self.0.checked_div(other.0).ok_or(ArithmeticError::Overflow)?;
        Self::bounded(quotient, policy)
    }

    /// The canonical storage form: exactly 2 fraction digits, dot separator,
    /// no grouping. This is the only shape an amount takes when persisted.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        let mut value = self.0;
        value.rescale(2);
        value.to_string()
    }

    fn bounded(raw: Decimal, policy: &AmountPolicy) -> Result<Self, ArithmeticError> {
        let rounded = round2(raw);
        if policy.in_magnitude(rounded) {
            Ok(Self(rounded))
        } else {
            Err(ArithmeticError::Overflow)
        }
    }
}

impl Default for DecimalAmount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}
