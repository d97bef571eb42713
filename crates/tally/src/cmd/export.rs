//! `tally export` - dump the ledger as CSV or a text report.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use tally_store::Ledger;

use crate::cmd::Context;
use crate::report::render_report;

/// Arguments for export.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output file (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One transaction per row.
    Csv,
    /// Human-readable summary report.
    Report,
}

/// Export the ledger.
pub fn run(args: &ExportArgs, ctx: &Context) -> Result<()> {
    let ledger = Ledger::load(&ctx.store)?;

    let content = match args.format {
        ExportFormat::Csv => transactions_csv(&ledger)?,
        ExportFormat::Report => render_report(&ledger, ctx.locale),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => {
            io::stdout().write_all(content.as_bytes())?;
        }
    }
    Ok(())
}

fn transactions_csv(ledger: &Ledger) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Date",
        "Account",
        "Type",
        "Category",
        "Description",
        "Amount",
        "Currency",
    ])?;

    let mut txns: Vec<_> = ledger.transactions.iter().collect();
    txns.sort_by_key(|t| t.date);

    for txn in txns {
        let (account, currency) = ledger
            .account(&txn.account_id)
            .map_or(("Unknown", "USD"), |a| (a.name.as_str(), a.currency.as_str()));
        writer.write_record([
            txn.date.to_string().as_str(),
            account,
            txn.kind.to_string().as_str(),
            txn.category.as_str(),
            txn.description.as_deref().unwrap_or(""),
            txn.amount_value().to_canonical_string().as_str(),
            currency,
        ])?;
    }

    let bytes = writer.into_inner().context("failed to flush csv")?;
    String::from_utf8(bytes).context("csv output was not utf-8")
}
