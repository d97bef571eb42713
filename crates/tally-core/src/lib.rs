//! Core types for tally
//!
//! This crate provides the fundamental types used throughout the tally project:
//!
//! - [`DecimalAmount`] - An exact monetary value with 2-decimal-place semantics
//! - [`AmountPolicy`] - Configurable bounds accepted for transaction amounts
//! - [`parse_lenient`] / [`parse_strict`] - Turning free-form text into amounts
//! - [`validate_amount`] - Structured validation of raw amount input
//! - [`format_amount`] - Locale-aware display formatting
//! - [`Account`], [`Transaction`], [`Category`] - The persisted domain model
//!
//! # Example
//!
//! ```
//! use tally_core::{parse_strict, validate_amount, format_amount, AmountPolicy, DisplayLocale};
//!
//! let policy = AmountPolicy::default();
//!
//! // Validate raw user input before committing it anywhere
//! let result = validate_amount("1234.56", &policy);
//! assert!(result.is_valid);
//!
//! // Strict parse at commit time
//! let amount = parse_strict("1234.56").unwrap();
//! assert_eq!(format_amount(&amount, DisplayLocale::CommaDecimal), "1.234,56");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod currency;
pub mod format;
pub mod model;
pub mod parse;
pub mod policy;
pub mod validate;

pub use amount::{ArithmeticError, DecimalAmount};
pub use currency::{currency_for, symbol_for, CurrencyInfo, CURRENCIES};
pub use format::{format_amount, format_input, format_with_symbol, DisplayLocale};
pub use model::{
    default_categories, generate_id, Account, Category, CategoryKind, Transaction, TransactionKind,
};
pub use parse::{parse_lenient, parse_strict, ParseError};
pub use policy::AmountPolicy;
pub use validate::{validate_amount, ValidationErrorKind, ValidationResult};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
