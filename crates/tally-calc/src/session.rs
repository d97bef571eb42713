//! The calculator session: one isolated, synchronous state machine.

use tracing::debug;

use tally_core::amount::ArithmeticError;
use tally_core::{
    format_amount, parse_lenient, validate_amount, AmountPolicy, DecimalAmount, DisplayLocale,
    ValidationErrorKind,
};
use thiserror::Error;

use crate::key::{Key, Operator};

/// Where the session is in the input flow.
///
/// One tagged state instead of independent "waiting for operand" / "has
/// decimal" / "replacing display" booleans, so invalid combinations are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No input yet; the display shows the zero placeholder.
    Initial,
    /// Digits are being typed into the active operand.
    EnteringOperand,
    /// An operator was chosen; the next digit starts a new operand.
    OperatorPending,
    /// A computed (or seeded) result is displayed. The next digit starts
    /// fresh; the next operator reuses the result as the left operand.
    Result,
}

/// A session-level error. Recoverable: the user backspaces or clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// An arithmetic operation failed.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    /// The committed value failed validation.
    #[error("invalid amount: {0}")]
    Invalid(ValidationErrorKind),
}

/// The left operand and operator of an in-progress binary operation.
///
/// At most one exists at a time: chaining evaluates eagerly, so there is no
/// operator stack and no precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingOp {
    left: DecimalAmount,
    op: Operator,
}

/// Transient interaction state while the user composes an amount.
///
/// Construct one per calculator invocation; drop it on cancel. Nothing here
/// touches storage or navigation.
#[derive(Debug, Clone)]
pub struct Session {
    policy: AmountPolicy,
    locale: DisplayLocale,
    /// The operand currently being typed, in internal dot form.
    operand: String,
    pending: Option<PendingOp>,
    last_result: Option<DecimalAmount>,
    phase: Phase,
    error: Option<SessionError>,
}

impl Session {
    /// Create a fresh session.
    #[must_use]
    pub const fn new(policy: AmountPolicy, locale: DisplayLocale) -> Self {
        Self {
            policy,
            locale,
            operand: String::new(),
            pending: None,
            last_result: None,
            phase: Phase::Initial,
            error: None,
        }
    }

    /// Create a session seeded from an existing amount string.
    ///
    /// The seed is parsed leniently and treated as a committed result: the
    /// next digit replaces it wholesale, the next operator chains from it.
    #[must_use]
    pub fn with_initial(policy: AmountPolicy, locale: DisplayLocale, initial: &str) -> Self {
        let mut session = Self::new(policy, locale);
        if !initial.trim().is_empty() {
            session.last_result = Some(parse_lenient(initial));
            session.phase = Phase::Result;
        }
        session
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The current session error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<SessionError> {
        self.error
    }

    /// The in-progress operation shown above the display, e.g. `"12.50 +"`.
    #[must_use]
    pub fn pending_line(&self) -> Option<String> {
        self.pending
            .as_ref()
            .map(|p| format!("{} {}", self.format_signed(&p.left), p.op))
    }

    /// The display string for the current state.
    #[must_use]
    pub fn display(&self) -> String {
        match self.phase {
            Phase::Initial => format_amount(&DecimalAmount::ZERO, self.locale),
            Phase::EnteringOperand => self
                .operand
                .replace('.', &self.locale.decimal_separator().to_string()),
            Phase::OperatorPending => {
                let left = self.pending.as_ref().map_or(DecimalAmount::ZERO, |p| p.left);
                self.format_signed(&left)
            }
            Phase::Result => {
                self.format_signed(&self.last_result.unwrap_or(DecimalAmount::ZERO))
            }
        }
    }

    /// Whether commit is currently allowed.
    #[must_use]
    pub fn can_commit(&self) -> bool {
        if self.error.is_some() {
            return false;
        }
        let value = match self.pending_evaluation() {
            Ok(value) => value,
            Err(_) => return false,
        };
        validate_amount(&value.to_canonical_string(), &self.policy).is_valid
    }

    /// Feed one input event through the machine.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.digit(d),
            Key::Decimal => self.decimal(),
            Key::Operator(op) => self.operator(op),
            Key::Equals => self.equals(),
            Key::Backspace => self.backspace(),
            Key::Clear => self.clear(),
        }
    }

    /// Commit the session: evaluate any pending operation, validate, and
    /// return the committed value.
    ///
    /// On failure the session records the error, commit stays disabled, and
    /// the state is left intact for correction. Cancelling is simply dropping
    /// the session.
    pub fn commit_value(&mut self) -> Option<DecimalAmount> {
        if self.error.is_some() {
            return None;
        }
        let value = match self.pending_evaluation() {
            Ok(value) => value,
            Err(err) => {
                self.error = Some(SessionError::Arithmetic(err));
                return None;
            }
        };
        let result = validate_amount(&value.to_canonical_string(), &self.policy);
        if let Some(kind) = result.error {
            debug!(kind = %kind, "commit rejected by validation");
            self.error = Some(SessionError::Invalid(kind));
            return None;
        }
        Some(value)
    }

    /// Commit and return the locale-formatted amount string.
    ///
    /// Display form only: it carries grouping separators, so anything that
    /// feeds the amount onward should take [`Self::commit_value`] instead.
    pub fn commit(&mut self) -> Option<String> {
        self.commit_value().map(|value| self.format_signed(&value))
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn digit(&mut self, d: u8) {
        self.error = None;
        let d = char::from(b'0' + (d % 10));
        match self.phase {
            Phase::EnteringOperand => {
                // "0" followed by a digit replaces the zero, avoiding "07".
                if self.operand == "0" {
                    self.operand.clear();
                }
                self.operand.push(d);
            }
            Phase::Initial | Phase::OperatorPending => {
                self.operand.clear();
                self.operand.push(d);
                self.phase = Phase::EnteringOperand;
            }
            Phase::Result => {
                // The result is final once another digit arrives.
                self.last_result = None;
                self.pending = None;
                self.operand.clear();
                self.operand.push(d);
                self.phase = Phase::EnteringOperand;
            }
        }
    }

    fn decimal(&mut self) {
        self.error = None;
        match self.phase {
            Phase::EnteringOperand => {
                // At most one decimal point per operand.
                if !self.operand.contains('.') {
                    if self.operand.is_empty() {
                        self.operand.push('0');
                    }
                    self.operand.push('.');
                }
            }
            Phase::Initial | Phase::OperatorPending => {
                self.operand = "0.".to_string();
                self.phase = Phase::EnteringOperand;
            }
            Phase::Result => {
                self.last_result = None;
                self.pending = None;
                self.operand = "0.".to_string();
                self.phase = Phase::EnteringOperand;
            }
        }
    }

    fn operator(&mut self, op: Operator) {
        if self.error.is_some() {
            return;
        }
        match self.phase {
            Phase::Initial => {
                // Nothing typed: zero becomes the left operand.
                self.pending = Some(PendingOp {
                    left: DecimalAmount::ZERO,
                    op,
                });
                self.phase = Phase::OperatorPending;
            }
            Phase::EnteringOperand => {
                let right = parse_lenient(&self.operand);
                match self.pending {
                    None => {
                        self.pending = Some(PendingOp { left: right, op });
                    }
                    Some(PendingOp { left, op: prev }) => {
                        // Chained evaluation: strict left-to-right.
                        match prev.apply(&left, &right, &self.policy) {
                            Ok(result) => {
                                self.pending = Some(PendingOp { left: result, op });
                            }
                            Err(err) => {
                                debug!(%err, "chained evaluation failed");
                                self.error = Some(SessionError::Arithmetic(err));
                                return;
                            }
                        }
                    }
                }
                self.operand.clear();
                self.phase = Phase::OperatorPending;
            }
            Phase::OperatorPending => {
                // Correct a mis-pressed operator without retyping.
                if let Some(pending) = self.pending.as_mut() {
                    pending.op = op;
                }
            }
            Phase::Result => {
                let left = self.last_result.take().unwrap_or(DecimalAmount::ZERO);
                self.pending = Some(PendingOp { left, op });
                self.phase = Phase::OperatorPending;
            }
        }
    }

    fn equals(&mut self) {
        if self.error.is_some() {
            return;
        }
        let Some(PendingOp { left, op }) = self.pending else {
            return;
        };
        if self.operand.is_empty() {
            return;
        }
        let right = parse_lenient(&self.operand);
        match op.apply(&left, &right, &self.policy) {
            Ok(result) => {
                self.last_result = Some(result);
                self.pending = None;
                self.operand.clear();
                self.phase = Phase::Result;
            }
            Err(err) => {
                // The session stays correctable: operands untouched.
                debug!(%err, "evaluation failed");
                self.error = Some(SessionError::Arithmetic(err));
            }
        }
    }

    fn backspace(&mut self) {
        self.error = None;
        if self.phase != Phase::EnteringOperand {
            return;
        }
        self.operand.pop();
        if self.operand.is_empty() {
            self.phase = if self.pending.is_some() {
                Phase::OperatorPending
            } else {
                Phase::Initial
            };
        }
    }

    fn clear(&mut self) {
        self.operand.clear();
        self.pending = None;
        self.last_result = None;
        self.phase = Phase::Initial;
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// The value a commit would see: any pending operation evaluated first.
    fn pending_evaluation(&self) -> Result<DecimalAmount, ArithmeticError> {
        match (&self.pending, self.operand.is_empty()) {
            (Some(PendingOp { left, op }), false) => {
                let right = parse_lenient(&self.operand);
                op.apply(left, &right, &self.policy)
            }
            (Some(PendingOp { left, .. }), true) => Ok(*left),
            (None, false) => Ok(parse_lenient(&self.operand)),
            (None, true) => Ok(self.last_result.unwrap_or(DecimalAmount::ZERO)),
        }
    }

    fn format_signed(&self, amount: &DecimalAmount) -> String {
        let text = format_amount(amount, self.locale);
        if amount.is_negative() {
            format!("-{text}")
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(AmountPolicy::default(), DisplayLocale::DotDecimal)
    }

    fn press_all(session: &mut Session, keys: &str) {
        for c in keys.chars() {
            if let Some(key) = Key::from_char(c) {
                session.press(key);
            }
        }
    }

    #[test]
    fn test_initial_display_is_zero_placeholder() {
        assert_eq!(session().display(), "0.00");
        assert_eq!(session().phase(), Phase::Initial);
    }

    #[test]
    fn test_digit_entry() {
        let mut s = session();
        press_all(&mut s, "12.5");
        assert_eq!(s.display(), "12.5");
        assert_eq!(s.phase(), Phase::EnteringOperand);
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let mut s = session();
        press_all(&mut s, "07");
        assert_eq!(s.display(), "7");
    }

    #[test]
    fn test_second_decimal_point_is_ignored() {
        let mut s = session();
        press_all(&mut s, "1.2.3");
        assert_eq!(s.display(), "1.23");
    }

    #[test]
    fn test_decimal_point_first_starts_zero() {
        let mut s = session();
        press_all(&mut s, ".5");
        assert_eq!(s.display(), "0.5");
    }

    #[test]
    fn test_simple_addition() {
        let mut s = session();
        press_all(&mut s, "9+1=");
        assert_eq!(s.phase(), Phase::Result);
        assert_eq!(s.display(), "10.00");
    }

    #[test]
    fn test_chained_operator_evaluates_intermediate() {
        // 9 + 1 + : the second + evaluates, left operand becomes 10.00.
        let mut s = session();
        press_all(&mut s, "9+1+");
        assert_eq!(s.phase(), Phase::OperatorPending);
        assert_eq!(s.display(), "10.00");
        press_all(&mut s, "5=");
        assert_eq!(s.display(), "15.00");
    }

    #[test]
    fn test_operator_can_be_corrected() {
        let mut s = session();
        press_all(&mut s, "8+");
        press_all(&mut s, "*");
        press_all(&mut s, "2=");
        assert_eq!(s.display(), "16.00");
    }

    #[test]
    fn test_division_rounds_half_up() {
        let mut s = session();
        press_all(&mut s, "10/3=");
        assert_eq!(s.display(), "3.33");
    }

    #[test]
    fn test_divide_by_zero_is_terminal_for_operation() {
        let mut s = session();
        press_all(&mut s, "5/0");
        let before = s.display();
        s.press(Key::Equals);
        // Error set, state unchanged, commit disabled.
        assert_eq!(s.error(), Some(SessionError::Arithmetic(ArithmeticError::DivisionByZero)));
        assert_eq!(s.display(), before);
        assert!(!s.can_commit());
        assert_eq!(s.commit(), None);
    }

    #[test]
    fn test_divide_by_zero_recovers_via_backspace() {
        let mut s = session();
        press_all(&mut s, "5/0=");
        s.press(Key::Backspace);
        assert_eq!(s.error(), None);
        press_all(&mut s, "2=");
        assert_eq!(s.display(), "2.50");
        assert!(s.can_commit());
    }

    #[test]
    fn test_overflow_keeps_pre_operation_state() {
        let mut s = session();
        press_all(&mut s, "999999999+1=");
        assert_eq!(s.error(), Some(SessionError::Arithmetic(ArithmeticError::Overflow)));
        // Still correctable: the typed operand survives.
        assert_eq!(s.phase(), Phase::EnteringOperand);
        assert_eq!(s.display(), "1");
        assert!(!s.can_commit());
    }

    #[test]
    fn test_result_digit_starts_fresh() {
        let mut s = session();
        press_all(&mut s, "9+1=");
        press_all(&mut s, "7");
        assert_eq!(s.display(), "7");
        assert_eq!(s.commit(), Some("7.00".to_string()));
    }

    #[test]
    fn test_result_operator_chains_from_result() {
        let mut s = session();
        press_all(&mut s, "9+1=");
        press_all(&mut s, "*2=");
        assert_eq!(s.display(), "20.00");
    }

    #[test]
    fn test_backspace_reverts_to_initial() {
        let mut s = session();
        press_all(&mut s, "12");
        s.press(Key::Backspace);
        assert_eq!(s.display(), "1");
        s.press(Key::Backspace);
        assert_eq!(s.phase(), Phase::Initial);
        assert_eq!(s.display(), "0.00");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut s = session();
        press_all(&mut s, "9+1");
        s.press(Key::Clear);
        assert_eq!(s.phase(), Phase::Initial);
        assert_eq!(s.pending_line(), None);
        assert_eq!(s.display(), "0.00");
    }

    #[test]
    fn test_commit_evaluates_pending_operation() {
        let mut s = session();
        press_all(&mut s, "9+1");
        // No equals pressed: commit evaluates first.
        assert_eq!(s.commit(), Some("10.00".to_string()));
    }

    #[test]
    fn test_commit_value_of_grouped_amount_revalidates() {
        // Above 999.99 the display string carries grouping separators, so
        // the value handed onward must stay in canonical form.
        let mut s = session();
        press_all(&mut s, "1000+500");
        let value = s.commit_value().expect("in-range amount commits");
        assert_eq!(value.to_canonical_string(), "1500.00");
        assert!(validate_amount(&value.to_canonical_string(), &AmountPolicy::default()).is_valid);

        let mut s = session();
        press_all(&mut s, "1000+500");
        assert_eq!(s.commit(), Some("1,500.00".to_string()));
    }

    #[test]
    fn test_commit_rejects_zero() {
        let mut s = session();
        assert!(!s.can_commit());
        assert_eq!(s.commit(), None);
        assert_eq!(
            s.error(),
            Some(SessionError::Invalid(ValidationErrorKind::NotPositive))
        );
    }

    #[test]
    fn test_seeded_session_behaves_like_result() {
        let policy = AmountPolicy::default();
        let mut s = Session::with_initial(policy, DisplayLocale::CommaDecimal, "1234,56");
        assert_eq!(s.phase(), Phase::Result);
        assert_eq!(s.display(), "1.234,56");

        // Next digit replaces the seeded value wholesale.
        s.press(Key::Digit(7));
        assert_eq!(s.display(), "7");
        assert_eq!(s.commit(), Some("7,00".to_string()));
    }

    #[test]
    fn test_seeded_session_chains_from_seed() {
        let policy = AmountPolicy::default();
        let mut s = Session::with_initial(policy, DisplayLocale::DotDecimal, "100");
        press_all(&mut s, "+50=");
        assert_eq!(s.display(), "150.00");
    }

    #[test]
    fn test_pending_line() {
        let mut s = session();
        press_all(&mut s, "12.5+");
        assert_eq!(s.pending_line(), Some("12.50 +".to_string()));
    }

    #[test]
    fn test_negative_intermediate_is_displayed_signed() {
        let mut s = session();
        press_all(&mut s, "5-9=");
        assert_eq!(s.display(), "-4.00");
        // But a negative result cannot be committed as a transaction amount.
        assert!(!s.can_commit());
    }

    #[test]
    fn test_exact_decimal_chain() {
        let mut s = session();
        press_all(&mut s, "0.1+0.2=");
        assert_eq!(s.display(), "0.30");
        assert_eq!(s.commit(), Some("0.30".to_string()));
    }
}
