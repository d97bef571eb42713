//! Parsing raw amount text into [`DecimalAmount`] values.
//!
//! Two paths exist on purpose. The lenient path runs on every keystroke while
//! the user is mid-typing, so it never fails: it produces the best-effort
//! value and defers rejection to validation. The strict path runs once at
//! commit time and fails with a [`ParseError`] when the shape is invalid.
//!
//! Both comma and dot are accepted as the decimal separator; normalization to
//! the internal dot form happens here at the parse boundary, never inside
//! arithmetic or storage.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::amount::DecimalAmount;

/// A strict-path parse error: the raw text does not match the amount grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty (or only whitespace).
    #[error("amount is empty")]
    Empty,
    /// A character outside digits and separators was found.
    #[error("invalid character '{0}' in amount")]
    InvalidCharacter(char),
    /// More than one decimal separator remained after normalization.
    #[error("amount has more than one decimal separator")]
    MultipleSeparators,
    /// More than 2 digits after the decimal separator.
    #[error("amount has more than 2 decimal places")]
    TooManyDecimals,
    /// The digits did not form a representable number.
    #[error("amount is not a valid number")]
    Malformed,
}

/// How a separator character is being used in a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorRole {
    Decimal,
    Grouping,
}

impl fmt::Display for SeparatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => write!(f, "decimal"),
            Self::Grouping => write!(f, "grouping"),
        }
    }
}

/// Normalize comma/dot usage to a single internal form: grouping separators
/// stripped, the decimal separator (if any) rewritten as a dot.
///
/// Disambiguation rules:
/// - both `.` and `,` present: the rightmost occurrence is the decimal
///   separator, the other character is grouping;
/// - one character occurring more than once: grouping;
/// - one character occurring once: decimal separator.
///
/// Inputs that remain ambiguous (the decimal character itself repeated) are
/// returned with the repeats intact so the strict path can reject them.
#[must_use]
pub fn normalize_separators(raw: &str) -> String {
    let trimmed = raw.trim();
    let dots = trimmed.matches('.').count();
    let commas = trimmed.matches(',').count();

    let roles = |dot_role: SeparatorRole, comma_role: SeparatorRole| {
        normalize_with(trimmed, dot_role, comma_role)
    };

    match (dots, commas) {
        (0, 0) => trimmed.to_string(),
        (_, 0) => {
            if dots == 1 {
                roles(SeparatorRole::Decimal, SeparatorRole::Grouping)
            } else {
                roles(SeparatorRole::Grouping, SeparatorRole::Decimal)
            }
        }
        (0, _) => {
            if commas == 1 {
                roles(SeparatorRole::Grouping, SeparatorRole::Decimal)
            } else {
                roles(SeparatorRole::Decimal, SeparatorRole::Grouping)
            }
        }
        (_, _) => {
            let last_dot = trimmed.rfind('.').unwrap_or(0);
            let last_comma = trimmed.rfind(',').unwrap_or(0);
            if last_dot > last_comma {
                roles(SeparatorRole::Decimal, SeparatorRole::Grouping)
            } else {
                roles(SeparatorRole::Grouping, SeparatorRole::Decimal)
            }
        }
    }
}

fn normalize_with(raw: &str, dot_role: SeparatorRole, comma_role: SeparatorRole) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '.' => {
                if dot_role == SeparatorRole::Decimal {
                    out.push('.');
                }
            }
            ',' => {
                if comma_role == SeparatorRole::Decimal {
                    out.push('.');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Best-effort parse for mid-typing input. Never fails.
///
/// Grouping separators are stripped, the decimal separator is normalized, any
/// other characters are dropped, and the value is rounded half-up to 2
/// places. Text with no usable digits parses as zero; rejection is the
/// validation layer's job.
#[must_use]
pub fn parse_lenient(raw: &str) -> DecimalAmount {
    let normalized = normalize_separators(raw);

    // Keep digits and the first decimal point only.
    let mut cleaned = String::with_capacity(normalized.len());
    let mut seen_point = false;
    for c in normalized.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(c);
            }
            _ => {}
        }
    }

    Decimal::from_str(&cleaned).map_or(DecimalAmount::ZERO, DecimalAmount::from_decimal)
}

/// Strict parse for commit-time input.
///
/// Accepts digits, optional grouping separators, and at most one decimal
/// separator followed by at most 2 digits. Anything else is a [`ParseError`].
pub fn parse_strict(raw: &str) -> Result<DecimalAmount, ParseError> {
    let normalized = normalize_separators(raw);
    if normalized.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Some(bad) = normalized.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
        return Err(ParseError::InvalidCharacter(bad));
    }
    if normalized.matches('.').count() > 1 {
        return Err(ParseError::MultipleSeparators);
    }
    if let Some((_, fraction)) = normalized.split_once('.') {
        if fraction.len() > 2 {
            return Err(ParseError::TooManyDecimals);
        }
    }

    let value = Decimal::from_str(&normalized).map_err(|_| ParseError::Malformed)?;
    Ok(DecimalAmount::from_decimal(value))
}
