//! Calculator state machine for tally
//!
//! A [`Session`] lets a user build a transaction amount through digit entry
//! and chained binary operations (strict left-to-right, no precedence), then
//! commit one validated amount string back to the caller.
//!
//! Every invocation of the calculator owns a fresh, isolated session; all
//! transitions are synchronous and complete within the input event that
//! caused them. Arithmetic errors never escape to the host: they become an
//! in-session message that disables commit until the user corrects the input.
//!
//! # Example
//!
//! ```
//! use tally_calc::{Key, Operator, Session};
//! use tally_core::{AmountPolicy, DisplayLocale};
//!
//! let mut session = Session::new(AmountPolicy::default(), DisplayLocale::DotDecimal);
//! session.press(Key::Digit(9));
//! session.press(Key::Operator(Operator::Add));
//! session.press(Key::Digit(1));
//! session.press(Key::Equals);
//! assert_eq!(session.display(), "10.00");
//! assert_eq!(session.commit(), Some("10.00".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod key;
pub mod session;

pub use key::{Key, Operator};
pub use session::{Phase, Session, SessionError};
