//! JSON file storage for the three persisted collections.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use tally_core::{default_categories, Account, Category, Transaction};

const ACCOUNTS_FILE: &str = "accounts.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const CATEGORIES_FILE: &str = "categories.json";

/// A storage error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a data file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A data file held malformed JSON.
    #[error("malformed data in {path}: {source}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}

/// File-backed storage rooted at a data directory.
///
/// Each collection lives in its own file; a missing file reads as the empty
/// collection (categories default-initialize instead, like a fresh install).
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store at the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The directory this store reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all accounts.
    pub fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.load_collection(ACCOUNTS_FILE)
    }

    /// Persist all accounts.
    pub fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError> {
        self.save_collection(ACCOUNTS_FILE, accounts)
    }

    /// Load all transactions.
    pub fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        self.load_collection(TRANSACTIONS_FILE)
    }

    /// Persist all transactions.
    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        self.save_collection(TRANSACTIONS_FILE, transactions)
    }

    /// Load all categories, initializing the default set on first use.
    pub fn load_categories(&self) -> Result<Vec<Category>, StoreError> {
        let path = self.dir.join(CATEGORIES_FILE);
        if !path.exists() {
            let defaults = default_categories();
            debug!(path = %path.display(), "initializing default categories");
            self.save_collection(CATEGORIES_FILE, &defaults)?;
            return Ok(defaults);
        }
        self.load_collection(CATEGORIES_FILE)
    }

    /// Persist all categories.
    pub fn save_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.save_collection(CATEGORIES_FILE, categories)
    }

    /// Remove every data file. The directory itself is kept.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        for name in [ACCOUNTS_FILE, TRANSACTIONS_FILE, CATEGORIES_FILE] {
            let path = self.dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(name);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no data file, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&data).map_err(|source| {
            warn!(path = %path.display(), "data file is malformed");
            StoreError::Json { path, source }
        })
    }

    fn save_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::{DecimalAmount, TransactionKind};

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_files_read_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load_accounts().unwrap().is_empty());
        assert!(store.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_categories_default_initialize() {
        let (_dir, store) = temp_store();
        let cats = store.load_categories().unwrap();
        assert_eq!(cats.len(), 14);
        // And the file now exists, so the defaults persist.
        assert!(store.dir().join("categories.json").exists());
    }

    #[test]
    fn test_round_trip_transactions() {
        let (_dir, store) = temp_store();
        let amount = DecimalAmount::from_decimal(dec!(42.50));
        let txn = Transaction::new("acct1", TransactionKind::Expense, &amount, "Shopping")
            .with_description("groceries");
        store.save_transactions(std::slice::from_ref(&txn)).unwrap();

        let loaded = store.load_transactions().unwrap();
        assert_eq!(loaded, vec![txn]);
        assert_eq!(loaded[0].amount, "42.50");
    }

    #[test]
    fn test_round_trip_accounts() {
        let (_dir, store) = temp_store();
        let account = Account::new("Checking", "USD", "🏦");
        store.save_accounts(std::slice::from_ref(&account)).unwrap();
        assert_eq!(store.load_accounts().unwrap(), vec![account]);
    }

    #[test]
    fn test_malformed_json_is_typed_error() {
        let (_dir, store) = temp_store();
        fs::write(store.dir().join("accounts.json"), "not json").unwrap();
        assert!(matches!(
            store.load_accounts(),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn test_clear_all() {
        let (_dir, store) = temp_store();
        store.load_categories().unwrap();
        store.clear_all().unwrap();
        assert!(!store.dir().join("categories.json").exists());
        // Clearing twice is fine.
        store.clear_all().unwrap();
    }
}
