//! Structured validation of raw amount input.
//!
//! Validation never throws: it returns a [`ValidationResult`] carrying a
//! validity flag and, on failure, the single first-failing
//! [`ValidationErrorKind`]. Checks run in a fixed order and are not
//! cumulative.
//!
//! Unlike the lenient parse path, validation accepts at most one separator:
//! grouping characters in the input are rejected, not stripped. The field UI
//! and the calculator both gate commits on this check.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::policy::AmountPolicy;

/// The first failing check for an invalid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The input was empty (or only whitespace).
    Empty,
    /// A letter or other disallowed symbol was found.
    InvalidCharacters,
    /// More than one decimal separator.
    MultipleSeparators,
    /// More than 2 digits after the decimal separator.
    TooManyDecimals,
    /// The value is not strictly positive (or falls under the policy minimum).
    NotPositive,
    /// The value exceeds the policy maximum.
    ExceedsMaximum,
    /// A disallowed leading zero, e.g. "0123" ("0.5" is fine).
    LeadingZero,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Amount is required"),
            Self::InvalidCharacters => {
                write!(f, "Amount can only contain numbers and a decimal point")
            }
            Self::MultipleSeparators => write!(f, "Amount can only have one decimal point"),
            Self::TooManyDecimals => write!(f, "Amount can have maximum 2 decimal places"),
            Self::NotPositive => write!(f, "Amount must be greater than 0"),
            Self::ExceedsMaximum => write!(f, "Amount exceeds the maximum"),
            Self::LeadingZero => write!(f, "Amount cannot have leading zeros"),
        }
    }
}

/// The outcome of validating a raw amount string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the input passed every check.
    pub is_valid: bool,
    /// The first failing check, when invalid.
    pub error: Option<ValidationErrorKind>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    /// A failing result with the given kind.
    #[must_use]
    pub const fn fail(kind: ValidationErrorKind) -> Self {
        Self {
            is_valid: false,
            error: Some(kind),
        }
    }
}

/// Validate a raw amount string against the policy.
///
/// Checks, in order (first failure wins): non-empty, allowed characters only,
/// at most one separator, strictly positive, within the maximum, at most 2
/// decimal digits, no disallowed leading zero.
#[must_use]
pub fn validate_amount(raw: &str, policy: &AmountPolicy) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ValidationResult::fail(ValidationErrorKind::Empty);
    }

    if trimmed
        .chars()
        .any(|c| !c.is_ascii_digit() && c != '.' && c != ',')
    {
        return ValidationResult::fail(ValidationErrorKind::InvalidCharacters);
    }

    let separators = trimmed.matches(['.', ',']).count();
    if separators > 1 {
        return ValidationResult::fail(ValidationErrorKind::MultipleSeparators);
    }

    let normalized = trimmed.replace(',', ".");
    let Ok(value) = Decimal::from_str(&normalized) else {
        // Allowed characters but no parseable number, e.g. a lone separator.
        return ValidationResult::fail(ValidationErrorKind::InvalidCharacters);
    };

    if value <= Decimal::ZERO {
        return ValidationResult::fail(ValidationErrorKind::NotPositive);
    }
    if value > policy.max {
        return ValidationResult::fail(ValidationErrorKind::ExceedsMaximum);
    }

    if let Some((_, fraction)) = normalized.split_once('.') {
        if fraction.len() > 2 {
            return ValidationResult::fail(ValidationErrorKind::TooManyDecimals);
        }
    }

    if normalized.len() > 1 && normalized.starts_with('0') && !normalized.starts_with("0.") {
        return ValidationResult::fail(ValidationErrorKind::LeadingZero);
    }

    if value < policy.min {
        return ValidationResult::fail(ValidationErrorKind::NotPositive);
    }

    ValidationResult::ok()
}
