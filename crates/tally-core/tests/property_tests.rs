//! Property-based tests for tally-core.
//!
//! These tests verify invariants hold for arbitrary inputs using proptest.
//!
//! Run with: cargo test -p tally-core --test `property_tests`

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_core::{
    format_amount, format_input, parse_lenient, parse_strict, validate_amount, AmountPolicy,
    DecimalAmount, DisplayLocale, ValidationErrorKind,
};

// ============================================================================
// Arbitrary generators
// ============================================================================

/// Cents in the accepted range, as a decimal with scale 2.
fn arb_valid_decimal() -> impl Strategy<Value = Decimal> {
    (1i64..=99_999_999_999i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_valid_amount() -> impl Strategy<Value = DecimalAmount> {
    arb_valid_decimal().prop_map(DecimalAmount::from_decimal)
}

/// A syntactically valid amount string with 0..=2 fraction digits.
fn arb_valid_string() -> impl Strategy<Value = String> {
    (1u64..=999_999_999u64, prop::option::of(0u8..=99u8)).prop_map(|(whole, frac)| match frac {
        Some(f) => format!("{whole}.{f:02}"),
        None => whole.to_string(),
    })
}

fn arb_string_with_letter() -> impl Strategy<Value = String> {
    ("[0-9]{0,4}", "[a-z]", "[0-9]{0,4}").prop_map(|(a, b, c)| format!("{a}{b}{c}"))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every in-range decimal string with at most 2 fraction digits validates.
    #[test]
    fn valid_strings_validate(raw in arb_valid_string()) {
        let result = validate_amount(&raw, &AmountPolicy::default());
        prop_assert!(result.is_valid, "expected {raw:?} to validate, got {:?}", result.error);
    }

    /// Any string containing a letter is rejected with the character kind.
    #[test]
    fn letters_are_invalid_characters(raw in arb_string_with_letter()) {
        let result = validate_amount(&raw, &AmountPolicy::default());
        prop_assert!(!result.is_valid);
        prop_assert_eq!(result.error, Some(ValidationErrorKind::InvalidCharacters));
    }

    /// Formatting is idempotent through the lenient parse.
    #[test]
    fn format_input_is_idempotent(raw in arb_valid_string()) {
        for locale in [DisplayLocale::DotDecimal, DisplayLocale::CommaDecimal] {
            let once = format_input(&raw, locale);
            let twice = format_input(&once, locale);
            prop_assert_eq!(&once, &twice);
        }
    }

    /// The canonical string round-trips exactly through the strict parser.
    #[test]
    fn canonical_string_round_trips(amount in arb_valid_amount()) {
        let canonical = amount.to_canonical_string();
        let back = parse_strict(&canonical).unwrap();
        prop_assert_eq!(back, amount);
    }

    /// Lenient and strict parses agree on well-formed input.
    #[test]
    fn lenient_agrees_with_strict(raw in arb_valid_string()) {
        let strict = parse_strict(&raw).unwrap();
        prop_assert_eq!(parse_lenient(&raw), strict);
    }

    /// Addition of two accepted amounts either overflows or stays rounded to
    /// 2 places and within magnitude bounds.
    #[test]
    fn addition_stays_bounded(a in arb_valid_amount(), b in arb_valid_amount()) {
        let policy = AmountPolicy::default();
        if let Ok(sum) = a.checked_add(&b, &policy) {
            prop_assert!(sum.value().scale() <= 2);
            prop_assert!(sum.value().abs() <= policy.max);
        }
    }

    /// Display output always carries exactly 2 fraction digits.
    #[test]
    fn display_has_two_fraction_digits(amount in arb_valid_amount()) {
        let text = format_amount(&amount, DisplayLocale::DotDecimal);
        let (_, frac) = text.rsplit_once('.').unwrap();
        prop_assert_eq!(frac.len(), 2);
    }
}
