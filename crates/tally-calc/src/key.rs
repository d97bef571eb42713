//! Input keys and binary operators.

use std::fmt;

use tally_core::amount::ArithmeticError;
use tally_core::{AmountPolicy, DecimalAmount};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Division.
    Divide,
}

impl Operator {
    /// Apply the operation, rounding half-up to 2 places.
    pub fn apply(
        self,
        left: &DecimalAmount,
        right: &DecimalAmount,
        policy: &AmountPolicy,
    ) -> Result<DecimalAmount, ArithmeticError> {
        match self {
            Self::Add => left.checked_add(right, policy),
            Self::Subtract => left.checked_sub(right, policy),
            Self::Multiply => left.checked_mul(right, policy),
            Self::Divide => left.checked_div(right, policy),
        }
    }

    /// The display symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single calculator input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A digit 0-9.
    Digit(u8),
    /// The decimal point.
    Decimal,
    /// A binary operator.
    Operator(Operator),
    /// Evaluate the pending operation.
    Equals,
    /// Remove the last character of the active operand.
    Backspace,
    /// Reset the whole session.
    Clear,
}

impl Key {
    /// Map a typed character to a key, if it has a meaning.
    ///
    /// Both ASCII and the keypad glyphs are accepted, and either comma or dot
    /// acts as the decimal point.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '.' | ',' => Some(Self::Decimal),
            '+' => Some(Self::Operator(Operator::Add)),
            '-' | '−' => Some(Self::Operator(Operator::Subtract)),
            '*' | 'x' | '×' => Some(Self::Operator(Operator::Multiply)),
            '/' | '÷' => Some(Self::Operator(Operator::Divide)),
            '=' => Some(Self::Equals),
            '<' => Some(Self::Backspace),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_rounds() {
        let policy = AmountPolicy::default();
        let ten = DecimalAmount::from_decimal(dec!(10));
        let three = DecimalAmount::from_decimal(dec!(3));
        let result = Operator::Divide.apply(&ten, &three, &policy).unwrap();
        assert_eq!(result.value(), dec!(3.33));
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
        assert_eq!(Key::from_char(','), Some(Key::Decimal));
        assert_eq!(Key::from_char('÷'), Some(Key::Operator(Operator::Divide)));
        assert_eq!(Key::from_char('x'), Some(Key::Operator(Operator::Multiply)));
        assert_eq!(Key::from_char('<'), Some(Key::Backspace));
        assert_eq!(Key::from_char('q'), None);
    }
}
