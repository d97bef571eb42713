//! Plain-text table and report rendering.

use chrono::Utc;
use std::fmt::Write;
use tally_core::{format_with_symbol, DecimalAmount, DisplayLocale};
use tally_store::Ledger;

/// Write a column-aligned text table.
pub fn write_table(out: &mut String, columns: &[&str], rows: &[Vec<String>]) {
    if columns.is_empty() {
        return;
    }

    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i < widths.len() && value.len() > widths[i] {
                widths[i] = value.len();
            }
        }
    }

    // Header
    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let _ = write!(out, "{:width$}", col, width = widths[i]);
    }
    out.push('\n');

    // Separator
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');

    // Rows
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            if i < widths.len() {
                let _ = write!(out, "{:width$}", value, width = widths[i]);
            } else {
                out.push_str(value);
            }
        }
        out.push('\n');
    }
}

/// Render the full text report: overall totals, per-account balances, and
/// the most recent transactions.
#[must_use]
pub fn render_report(ledger: &Ledger, locale: DisplayLocale) -> String {
    let (income, expense) = ledger.overall_totals();
    let net = income - expense;

    let mut out = String::new();
    let _ = writeln!(out, "TALLY REPORT");
    let _ = writeln!(out, "Generated on: {}", Utc::now().date_naive());
    out.push('\n');

    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "=======");
    let _ = writeln!(out, "Total Accounts: {}", ledger.accounts.len());
    let _ = writeln!(out, "Total Transactions: {}", ledger.transactions.len());
    let _ = writeln!(out, "Total Income: {}", signed(income, locale));
    let _ = writeln!(out, "Total Expenses: {}", signed(expense, locale));
    let _ = writeln!(out, "Net Balance: {}", signed(net, locale));
    out.push('\n');

    let _ = writeln!(out, "ACCOUNTS");
    let _ = writeln!(out, "========");
    for account in &ledger.accounts {
        let balance = ledger.balance(&account.id);
        let display = DecimalAmount::from_decimal(balance);
        let sign = if balance.is_sign_negative() { "-" } else { "" };
        let _ = writeln!(
            out,
            "{}: {sign}{}",
            account.name,
            format_with_symbol(&display, &account.currency, locale)
        );
    }
    out.push('\n');

    let _ = writeln!(out, "RECENT TRANSACTIONS");
    let _ = writeln!(out, "===================");
    let mut recent: Vec<_> = ledger.transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    for txn in recent.into_iter().take(20) {
        let account = ledger
            .account(&txn.account_id)
            .map_or("Unknown", |a| a.name.as_str());
        let prefix = match txn.kind {
            tally_core::TransactionKind::Income => "+",
            _ => "-",
        };
        let _ = writeln!(
            out,
            "{} {account} {} {prefix}{} ({})",
            txn.date,
            txn.category,
            tally_core::format_amount(&txn.amount_value(), locale),
            txn.kind,
        );
    }

    out
}

pub(crate) fn signed(value: rust_decimal::Decimal, locale: DisplayLocale) -> String {
    let display = DecimalAmount::from_decimal(value);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}", tally_core::format_amount(&display, locale))
}
