//! Local persistence and the in-memory ledger for tally
//!
//! A [`Store`] owns a data directory with one JSON file per collection
//! (accounts, transactions, categories), mirroring how the tracker keeps each
//! collection under its own key. A [`Ledger`] is the loaded aggregate with
//! CRUD operations and the summary computations the views consume.
//!
//! Amounts cross this boundary only as canonical 2-decimal strings; balances
//! are computed in exact decimal from those strings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ledger;
pub mod store;

pub use ledger::{CategoryTotal, Ledger, MonthKey, MonthlyTotal};
pub use store::{Store, StoreError};
