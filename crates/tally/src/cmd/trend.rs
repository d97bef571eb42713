//! `tally trend` - month-over-month income and spending.

use anyhow::{bail, Result};
use clap::Args;
use tally_core::{format_amount, DecimalAmount};
use tally_store::Ledger;

use crate::cmd::Context;
use crate::report::{signed, write_table};

/// Arguments for the trend report.
#[derive(Args, Debug)]
pub struct TrendArgs {
    /// Only show the most recent N months.
    #[arg(long)]
    pub last: Option<usize>,
}

/// Print monthly income, expense and net totals.
pub fn run(args: &TrendArgs, ctx: &Context) -> Result<()> {
    let ledger = Ledger::load(&ctx.store)?;
    let mut months = ledger.monthly_totals();
    if months.is_empty() {
        bail!("no transactions yet");
    }

    if let Some(last) = args.last {
        let skip = months.len().saturating_sub(last);
        months.drain(..skip);
    }

    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|m| {
            vec![
                m.month.to_string(),
                format_amount(&DecimalAmount::from_decimal(m.income), ctx.locale),
                format_amount(&DecimalAmount::from_decimal(m.expense), ctx.locale),
                signed(m.net(), ctx.locale),
            ]
        })
        .collect();

    let mut out = String::new();
    write_table(&mut out, &["Month", "Income", "Expenses", "Net"], &rows);
    print!("{out}");
    Ok(())
}
