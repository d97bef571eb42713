//! tally - a local-first personal finance tracker.
//!
//! # Usage
//!
//! ```bash
//! tally account add Checking --currency USD
//! tally tx add Checking --amount 12.50 --category "Food & Dining"
//! tally tx add Checking --calc --category Shopping
//! tally summary --month 2026-08
//! tally export --format csv -o transactions.csv
//! tally calc
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tally_core::{AmountPolicy, DisplayLocale};
use tracing_subscriber::EnvFilter;

mod cmd;
mod report;

use cmd::Context;

/// Local-first personal finance tracker.
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data directory (default: the platform data dir).
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Separator convention for displayed amounts.
    #[arg(long, value_enum, default_value_t = LocaleArg::Dot, global = true)]
    locale: LocaleArg,

    /// Show verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage accounts.
    Account {
        #[command(subcommand)]
        cmd: cmd::account::AccountCmd,
    },
    /// Log and list transactions.
    Tx {
        #[command(subcommand)]
        cmd: cmd::tx::TxCmd,
    },
    /// Category breakdown for a month (or all time).
    Summary(cmd::summary::SummaryArgs),
    /// Monthly income/expense trend.
    Trend(cmd::trend::TrendArgs),
    /// Export transactions as CSV or a text report.
    Export(cmd::export::ExportArgs),
    /// Interactive amount calculator.
    Calc(cmd::calc::CalcArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LocaleArg {
    /// 1,234.56
    Dot,
    /// 1.234,56
    Comma,
}

impl From<LocaleArg> for DisplayLocale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Dot => Self::DotDecimal,
            LocaleArg::Comma => Self::CommaDecimal,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let ctx = Context::open(data_dir, cli.locale.into(), AmountPolicy::default())?;

    match cli.command {
        Command::Account { cmd } => cmd::account::run(&cmd, &ctx),
        Command::Tx { cmd } => cmd::tx::run(&cmd, &ctx),
        Command::Summary(args) => cmd::summary::run(&args, &ctx),
        Command::Trend(args) => cmd::trend::run(&args, &ctx),
        Command::Export(args) => cmd::export::run(&args, &ctx),
        Command::Calc(args) => cmd::calc::run(&args, &ctx),
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join("tally"))
        .ok_or_else(|| anyhow::anyhow!("could not determine the platform data directory"))
}
