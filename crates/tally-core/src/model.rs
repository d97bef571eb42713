//! The persisted domain model: accounts, transactions, and categories.
//!
//! Amounts cross this boundary only as canonical 2-decimal strings, never as
//! binary floating-point numbers. That is a hard compatibility requirement
//! for anything that stores these records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::amount::DecimalAmount;
use crate::parse::parse_lenient;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the account.
    Expense,
    /// Money entering the account.
    Income,
    /// Money moved to another account.
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// Which side of the ledger a category applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Spending categories.
    Expense,
    /// Earning categories.
    Income,
}

/// A user account holding transactions in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Currency code, e.g. "USD".
    pub currency: String,
    /// Display icon (emoji).
    pub icon: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, currency: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            currency: currency.into(),
            icon: icon.into(),
            created_at: Utc::now(),
        }
    }
}

/// A single logged income/expense/transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: String,
    /// The owning account.
    pub account_id: String,
    /// Direction of the transaction.
    pub kind: TransactionKind,
    /// Canonical 2-decimal amount string, always non-negative.
    pub amount: String,
    /// Category name.
    pub category: String,
    /// Optional free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The day the transaction happened.
    pub date: NaiveDate,
    /// Destination account for transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_to: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction dated today with a fresh id.
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        kind: TransactionKind,
        amount: &DecimalAmount,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            account_id: account_id.into(),
            kind,
            amount: amount.to_canonical_string(),
            category: category.into(),
            description: None,
            date: Utc::now().date_naive(),
            transfer_to: None,
            created_at: Utc::now(),
        }
    }

    /// Set the transaction date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the destination account for a transfer.
    #[must_use]
    pub fn with_transfer_to(mut self, account_id: impl Into<String>) -> Self {
        self.transfer_to = Some(account_id.into());
        self
    }

    /// The stored amount as a decimal value.
    ///
    /// Stored strings are canonical, so the lenient parse cannot lose
    /// anything here.
    #[must_use]
    pub fn amount_value(&self) -> DecimalAmount {
        parse_lenient(&self.amount)
    }
}

/// A transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display icon (emoji).
    pub icon: String,
    /// Whether this is an expense or income category.
    pub kind: CategoryKind,
    /// Display color (hex).
    pub color: String,
}

/// The default category set a fresh install starts with.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    use CategoryKind::{Expense, Income};
    [
        ("1", "Food & Dining", "🍽️", Expense, "#ef4444"),
        ("2", "Transportation", "🚗", Expense, "#f97316"),
        ("3", "Shopping", "🛍️", Expense, "#eab308"),
        ("4", "Entertainment", "🎬", Expense, "#a855f7"),
        ("5", "Healthcare", "🏥", Expense, "#ec4899"),
        ("6", "Housing & Utilities", "🏠", Expense, "#6b7280"),
        ("7", "Travel", "✈️", Expense, "#06b6d4"),
        ("8", "Other Expenses", "💸", Expense, "#8b5cf6"),
        ("9", "Salary/Wages", "💼", Income, "#22c55e"),
        ("10", "Business Revenue", "💻", Income, "#10b981"),
        ("11", "Investments", "📈", Income, "#059669"),
        ("12", "Rental Income", "🏠", Income, "#16a34a"),
        ("13", "Loans", "🏦", Income, "#15803d"),
        ("14", "Other Income", "💰", Income, "#047857"),
    ]
    .into_iter()
    .map(|(id, name, icon, kind, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        kind,
        color: color.to_string(),
    })
    .collect()
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique id: millisecond timestamp plus a process-local counter,
/// both base-36 encoded.
#[must_use]
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}", base36(millis), base36(count))
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
