//! Command implementations.
//!
//! Each module contains the full implementation for one subcommand; the
//! binary entry point only dispatches.

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tally_core::{AmountPolicy, DisplayLocale};
use tally_store::Store;

pub mod account;
pub mod calc;
pub mod export;
pub mod summary;
pub mod trend;
pub mod tx;

/// Shared command context: the opened store plus display and bounds settings.
pub struct Context {
    /// File-backed storage.
    pub store: Store,
    /// Separator convention for output.
    pub locale: DisplayLocale,
    /// Accepted amount bounds.
    pub policy: AmountPolicy,
}

impl Context {
    /// Open the store and assemble the context.
    pub fn open(data_dir: PathBuf, locale: DisplayLocale, policy: AmountPolicy) -> Result<Self> {
        let store = Store::open(&data_dir)
            .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;
        Ok(Self {
            store,
            locale,
            policy,
        })
    }
}
