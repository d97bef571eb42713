//! Locale-aware display formatting for amounts.
//!
//! Formatting always produces exactly 2 fraction digits and a non-negative
//! sign; the income/expense direction is a caller-supplied prefix. The choice
//! of separator pair is purely a display concern and never leaks into
//! arithmetic or storage, which use the canonical dot form.

use std::fmt;

use crate::amount::DecimalAmount;
use crate::currency::symbol_for;
use crate::parse::parse_lenient;

/// Which separator convention to use when displaying amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    /// Dot decimal separator, comma grouping: `1,234.56`.
    #[default]
    DotDecimal,
    /// Comma decimal separator, dot grouping: `1.234,56`.
    CommaDecimal,
}

impl DisplayLocale {
    /// The character shown between the integer and fraction parts.
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::DotDecimal => '.',
            Self::CommaDecimal => ',',
        }
    }

    /// The character shown between groups of three integer digits.
    #[must_use]
    pub const fn grouping_separator(self) -> char {
        match self {
            Self::DotDecimal => ',',
            Self::CommaDecimal => '.',
        }
    }
}

impl fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DotDecimal => write!(f, "dot-decimal"),
            Self::CommaDecimal => write!(f, "comma-decimal"),
        }
    }
}

/// Format an amount for display: grouped integer digits, the locale's
/// separators, exactly 2 fraction digits, no sign.
#[must_use]
pub fn format_amount(amount: &DecimalAmount, locale: DisplayLocale) -> String {
    let canonical = amount.abs().to_canonical_string();
    let (int_part, frac_part) = canonical
        .split_once('.')
        .unwrap_or((canonical.as_str(), "00"));

    let mut out = String::with_capacity(canonical.len() + int_part.len() / 3 + 1);
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(locale.grouping_separator());
        }
        out.push(c);
    }
    out.push(locale.decimal_separator());
    out.push_str(frac_part);
    out
}

/// Inline-field helper: leniently parse free-form text and re-format it in
/// the given locale. Idempotent for any text the lenient parser accepts.
#[must_use]
pub fn format_input(text: &str, locale: DisplayLocale) -> String {
    format_amount(&parse_lenient(text), locale)
}

/// Format an amount with its currency symbol, falling back to the raw code
/// for currencies outside the built-in table.
#[must_use]
pub fn format_with_symbol(amount: &DecimalAmount, code: &str, locale: DisplayLocale) -> String {
    format!("{}{}", symbol_for(code), format_amount(amount, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(v: rust_decimal::Decimal) -> DecimalAmount {
        DecimalAmount::from_decimal(v)
    }

    #[test]
    fn test_two_fraction_digits_always() {
        assert_eq!(format_amount(&amount(dec!(7)), DisplayLocale::DotDecimal), "7.00");
        assert_eq!(format_amount(&amount(dec!(7.5)), DisplayLocale::DotDecimal), "7.50");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(
            format_amount(&amount(dec!(1234.56)), DisplayLocale::DotDecimal),
            "1,234.56"
        );
        assert_eq!(
            format_amount(&amount(dec!(1234.56)), DisplayLocale::CommaDecimal),
            "1.234,56"
        );
        assert_eq!(
            format_amount(&amount(dec!(999999999.99)), DisplayLocale::DotDecimal),
            "999,999,999.99"
        );
        assert_eq!(format_amount(&amount(dec!(999.99)), DisplayLocale::DotDecimal), "999.99");
    }

    #[test]
    fn test_sign_is_never_emitted() {
        assert_eq!(
            format_amount(&amount(dec!(-1234.56)), DisplayLocale::DotDecimal),
            "1,234.56"
        );
    }

    #[test]
    fn test_format_input_idempotent() {
        for raw in ["1234,56", "1,234.56", "7", "0.5"] {
            let once = format_input(raw, DisplayLocale::CommaDecimal);
            let twice = format_input(&once, DisplayLocale::CommaDecimal);
            assert_eq!(once, twice, "format_input not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(
            format_with_symbol(&amount(dec!(12.5)), "USD", DisplayLocale::DotDecimal),
            "$12.50"
        );
        assert_eq!(
            format_with_symbol(&amount(dec!(12.5)), "XXX", DisplayLocale::DotDecimal),
            "XXX12.50"
        );
    }
}
