//! The loaded aggregate: accounts, transactions, categories, and the
//! summary computations the views consume.
//!
//! All aggregation happens in exact [`Decimal`] arithmetic over the stored
//! 2-decimal amount strings. Balances are signed: direction comes from the
//! transaction kind, never from the sign of a stored amount.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;

use tally_core::{Account, Category, Transaction, TransactionKind};

use crate::store::{Store, StoreError};

/// A calendar month used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
}

impl MonthKey {
    /// The month a date falls in.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Total spent or earned in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Sum of amounts, always non-negative.
    pub total: Decimal,
    /// Number of transactions.
    pub count: usize,
}

/// Income and expense totals for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// The month.
    pub month: MonthKey,
    /// Total income, non-negative.
    pub income: Decimal,
    /// Total expenses, non-negative.
    pub expense: Decimal,
}

impl MonthlyTotal {
    /// Income minus expenses for the month.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// The in-memory aggregate of everything the tracker persists.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// All accounts.
    pub accounts: Vec<Account>,
    /// All transactions, in insertion order.
    pub transactions: Vec<Transaction>,
    /// All categories.
    pub categories: Vec<Category>,
}

impl Ledger {
    /// Load the full ledger from a store.
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        Ok(Self {
            accounts: store.load_accounts()?,
            transactions: store.load_transactions()?,
            categories: store.load_categories()?,
        })
    }

    /// Persist the full ledger to a store.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.save_accounts(&self.accounts)?;
        store.save_transactions(&self.transactions)?;
        store.save_categories(&self.categories)
    }

    /// Find an account by id.
    #[must_use]
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Find an account by (case-insensitive) name.
    #[must_use]
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Find a category by (case-insensitive) name.
    #[must_use]
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// The signed balance of an account.
    ///
    /// Income adds, expenses subtract, transfers subtract from the source and
    /// add to the destination.
    #[must_use]
    pub fn balance(&self, account_id: &str) -> Decimal {
        let mut balance = Decimal::ZERO;
        for txn in &self.transactions {
            let amount = txn.amount_value().value();
            match txn.kind {
                TransactionKind::Income if txn.account_id == account_id => balance += amount,
                TransactionKind::Expense if txn.account_id == account_id => balance -= amount,
                TransactionKind::Transfer => {
                    if txn.account_id == account_id {
                        balance -= amount;
                    }
                    if txn.transfer_to.as_deref() == Some(account_id) {
                        balance += amount;
                    }
                }
                _ => {}
            }
        }
        balance
    }

    /// Transactions of one account, most recent date first.
    #[must_use]
    pub fn transactions_for(&self, account_id: &str) -> Vec<&Transaction> {
        let mut txns: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .collect();
        txns.sort_by(|a, b| b.date.cmp(&a.date));
        txns
    }

    /// Per-category totals for one transaction kind, optionally restricted to
    /// a month. Sorted by total, largest first.
    #[must_use]
    pub fn category_totals(&self, kind: TransactionKind, month: Option<MonthKey>) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for txn in &self.transactions {
            if txn.kind != kind {
                continue;
            }
            if let Some(m) = month {
                if MonthKey::from_date(txn.date) != m {
                    continue;
                }
            }
            let amount = txn.amount_value().value();
            match totals.iter_mut().find(|t| t.category == txn.category) {
                Some(entry) => {
                    entry.total += amount;
                    entry.count += 1;
                }
                None => totals.push(CategoryTotal {
                    category: txn.category.clone(),
                    total: amount,
                    count: 1,
                }),
            }
        }
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        totals
    }

    /// Income/expense totals per month, oldest first. Transfers are internal
    /// movements and do not appear in the trend.
    #[must_use]
    pub fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        let mut totals: Vec<MonthlyTotal> = Vec::new();
        for txn in &self.transactions {
            let month = MonthKey::from_date(txn.date);
            let amount = txn.amount_value().value();
            let idx = match totals.iter().position(|t| t.month == month) {
                Some(idx) => idx,
                None => {
                    totals.push(MonthlyTotal {
                        month,
                        income: Decimal::ZERO,
                        expense: Decimal::ZERO,
                    });
                    totals.len() - 1
                }
            };
            let entry = &mut totals[idx];
            match txn.kind {
                TransactionKind::Income => entry.income += amount,
                TransactionKind::Expense => entry.expense += amount,
                TransactionKind::Transfer => {}
            }
        }
        totals.sort_by_key(|t| t.month);
        totals
    }

    /// Total income and expenses across the whole ledger.
    #[must_use]
    pub fn overall_totals(&self) -> (Decimal, Decimal) {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for txn in &self.transactions {
            let amount = txn.amount_value().value();
            match txn.kind {
                TransactionKind::Income => income += amount,
                TransactionKind::Expense => expense += amount,
                TransactionKind::Transfer => {}
            }
        }
        (income, expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::DecimalAmount;

    fn amount(v: Decimal) -> DecimalAmount {
        DecimalAmount::from_decimal(v)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Ledger {
        let checking = Account::new("Checking", "USD", "🏦");
        let savings = Account::new("Savings", "USD", "🏛️");
        let txns = vec![
            Transaction::new(&checking.id, TransactionKind::Income, &amount(dec!(1000)), "Salary/Wages")
                .with_date(date(2026, 7, 1)),
            Transaction::new(&checking.id, TransactionKind::Expense, &amount(dec!(120.50)), "Food & Dining")
                .with_date(date(2026, 7, 5)),
            Transaction::new(&checking.id, TransactionKind::Expense, &amount(dec!(30.25)), "Food & Dining")
                .with_date(date(2026, 8, 2)),
            Transaction::new(&checking.id, TransactionKind::Expense, &amount(dec!(60)), "Transportation")
                .with_date(date(2026, 8, 3)),
            Transaction::new(&checking.id, TransactionKind::Transfer, &amount(dec!(200)), "Transfer")
                .with_date(date(2026, 8, 4))
                .with_transfer_to(&savings.id),
        ];
        Ledger {
            accounts: vec![checking, savings],
            transactions: txns,
            categories: tally_core::default_categories(),
        }
    }

    #[test]
    fn test_balance_is_signed_by_kind() {
        let ledger = sample();
        let checking = &ledger.accounts[0];
        let savings = &ledger.accounts[1];
        // 1000 - 120.50 - 30.25 - 60 - 200
        assert_eq!(ledger.balance(&checking.id), dec!(589.25));
        assert_eq!(ledger.balance(&savings.id), dec!(200));
    }

    #[test]
    fn test_category_totals_sorted_descending() {
        let ledger = sample();
        let totals = ledger.category_totals(TransactionKind::Expense, None);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "Food & Dining");
        assert_eq!(totals[0].total, dec!(150.75));
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].total, dec!(60));
    }

    #[test]
    fn test_category_totals_month_filter() {
        let ledger = sample();
        let july = MonthKey { year: 2026, month: 7 };
        let totals = ledger.category_totals(TransactionKind::Expense, Some(july));
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, dec!(120.50));
    }

    #[test]
    fn test_monthly_totals_exclude_transfers() {
        let ledger = sample();
        let trend = ledger.monthly_totals();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month.to_string(), "2026-07");
        assert_eq!(trend[0].income, dec!(1000));
        assert_eq!(trend[0].expense, dec!(120.50));
        assert_eq!(trend[1].expense, dec!(90.25));
        assert_eq!(trend[1].net(), dec!(-90.25));
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let ledger = sample();
        ledger.save(&store).unwrap();

        let loaded = Ledger::load(&store).unwrap();
        assert_eq!(loaded.accounts, ledger.accounts);
        assert_eq!(loaded.transactions, ledger.transactions);
        assert_eq!(loaded.categories, ledger.categories);
    }
}
