//! `tally summary` - spending and income totals by category.

use anyhow::{bail, Result};
use clap::Args;
use tally_core::TransactionKind;
use tally_store::{Ledger, MonthKey};

use crate::cmd::Context;
use crate::report::write_table;

/// Arguments for the summary report.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Restrict to one month (YYYY-MM).
    #[arg(long, value_parser = parse_month)]
    pub month: Option<MonthKey>,

    /// Show income instead of expenses.
    #[arg(long)]
    pub income: bool,
}

fn parse_month(raw: &str) -> Result<MonthKey, String> {
    let (year, month) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {raw:?}"))?;
    let year: i32 = year.parse().map_err(|_| format!("bad year in {raw:?}"))?;
    let month: u32 = month.parse().map_err(|_| format!("bad month in {raw:?}"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month out of range in {raw:?}"));
    }
    Ok(MonthKey { year, month })
}

/// Print category totals.
pub fn run(args: &SummaryArgs, ctx: &Context) -> Result<()> {
    let ledger = Ledger::load(&ctx.store)?;
    if ledger.transactions.is_empty() {
        bail!("no transactions yet");
    }

    let kind = if args.income {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };
    let totals = ledger.category_totals(kind, args.month);

    let label = if args.income { "Income" } else { "Expenses" };
    match args.month {
        Some(month) => println!("{label} for {month} by category"),
        None => println!("{label} by category (all time)"),
    }
    println!();

    if totals.is_empty() {
        println!("Nothing in this period.");
        return Ok(());
    }

    let grand: rust_decimal::Decimal = totals.iter().map(|t| t.total).sum();
    let rows: Vec<Vec<String>> = totals
        .iter()
        .map(|t| {
            let amount = tally_core::DecimalAmount::from_decimal(t.total);
            vec![
                t.category.clone(),
                tally_core::format_amount(&amount, ctx.locale),
                t.count.to_string(),
            ]
        })
        .collect();

    let mut out = String::new();
    write_table(&mut out, &["Category", "Total", "Count"], &rows);
    print!("{out}");
    println!();
    println!(
        "Total: {}",
        tally_core::format_amount(&tally_core::DecimalAmount::from_decimal(grand), ctx.locale)
    );
    Ok(())
}
