//! `tally tx` - log and list transactions.

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use tally_core::{
    format_amount, parse_strict, validate_amount, Transaction, TransactionKind,
};
use tally_store::Ledger;
use tracing::info;

use crate::cmd::{calc, Context};
use crate::report::write_table;

/// Transaction subcommands.
#[derive(Subcommand, Debug)]
pub enum TxCmd {
    /// Log a transaction.
    Add {
        /// Account name.
        account: String,
        /// Amount, e.g. 12.50 or 12,50. Omit together with --calc to compose
        /// the amount interactively.
        #[arg(long)]
        amount: Option<String>,
        /// Open the calculator, seeded with --amount if given.
        #[arg(long)]
        calc: bool,
        /// Transaction direction.
        #[arg(long, value_enum, default_value_t = KindArg::Expense)]
        kind: KindArg,
        /// Category name.
        #[arg(long)]
        category: String,
        /// Optional note.
        #[arg(long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD, default today).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Destination account for transfers.
        #[arg(long)]
        to: Option<String>,
    },
    /// List transactions, optionally for one account.
    List {
        /// Account name.
        account: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Money leaving the account.
    Expense,
    /// Money entering the account.
    Income,
    /// Money moved to another account.
    Transfer,
}

impl From<KindArg> for TransactionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Expense => Self::Expense,
            KindArg::Income => Self::Income,
            KindArg::Transfer => Self::Transfer,
        }
    }
}

/// Run a transaction subcommand.
pub fn run(cmd: &TxCmd, ctx: &Context) -> Result<()> {
    match cmd {
        TxCmd::Add {
            account,
            amount,
            calc,
            kind,
            category,
            description,
            date,
            to,
        } => add(
            ctx,
            account,
            amount.as_deref(),
            *calc,
            (*kind).into(),
            category,
            description.as_deref(),
            *date,
            to.as_deref(),
        ),
        TxCmd::List { account } => list(ctx, account.as_deref()),
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    ctx: &Context,
    account_name: &str,
    amount: Option<&str>,
    use_calc: bool,
    kind: TransactionKind,
    category: &str,
    description: Option<&str>,
    date: Option<NaiveDate>,
    transfer_to: Option<&str>,
) -> Result<()> {
    let mut ledger = Ledger::load(&ctx.store)?;

    let Some(account_id) = ledger.account_by_name(account_name).map(|a| a.id.clone()) else {
        bail!("no account named {account_name:?}");
    };

    // Resolve the amount: the session validates its own commit, raw flag
    // text is validated here.
    let value = if use_calc {
        match calc::run_session(ctx, amount.unwrap_or_default())? {
            Some(committed) => committed,
            None => {
                println!("Cancelled; nothing logged.");
                return Ok(());
            }
        }
    } else {
        let raw = amount.context("either --amount or --calc is required")?;
        let result = validate_amount(raw, &ctx.policy);
        if let Some(kind) = result.error {
            bail!("invalid amount {raw:?}: {kind}");
        }
        parse_strict(raw).with_context(|| format!("failed to parse amount {raw:?}"))?
    };

    if ledger.category_by_name(category).is_none() {
        bail!("no category named {category:?} (see the default set with: tally summary)");
    }

    let transfer_to_id = match (kind, transfer_to) {
        (TransactionKind::Transfer, Some(name)) => {
            let Some(dest) = ledger.account_by_name(name) else {
                bail!("no account named {name:?}");
            };
            Some(dest.id.clone())
        }
        (TransactionKind::Transfer, None) => bail!("--to is required for transfers"),
        (_, Some(_)) => bail!("--to only applies to transfers"),
        (_, None) => None,
    };

    let mut txn = Transaction::new(&account_id, kind, &value, category);
    if let Some(date) = date {
        txn = txn.with_date(date);
    }
    if let Some(description) = description {
        txn = txn.with_description(description);
    }
    if let Some(dest) = transfer_to_id {
        txn = txn.with_transfer_to(dest);
    }

    info!(id = %txn.id, %kind, "transaction logged");
    println!(
        "Logged {kind} of {} on {} ({category})",
        format_amount(&value, ctx.locale),
        txn.date,
    );
    ledger.transactions.push(txn);
    ledger.save(&ctx.store)?;
    Ok(())
}

fn list(ctx: &Context, account_name: Option<&str>) -> Result<()> {
    let ledger = Ledger::load(&ctx.store)?;

    let filter_id = match account_name {
        Some(name) => match ledger.account_by_name(name) {
            Some(account) => Some(account.id.clone()),
            None => bail!("no account named {name:?}"),
        },
        None => None,
    };

    let mut txns: Vec<_> = ledger
        .transactions
        .iter()
        .filter(|t| filter_id.as_ref().map_or(true, |id| &t.account_id == id))
        .collect();
    txns.sort_by(|a, b| b.date.cmp(&a.date));

    if txns.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = txns
        .iter()
        .map(|txn| {
            let account = ledger
                .account(&txn.account_id)
                .map_or("Unknown", |a| a.name.as_str());
            let prefix = match txn.kind {
                TransactionKind::Income => "+",
                _ => "-",
            };
            vec![
                txn.date.to_string(),
                account.to_string(),
                txn.kind.to_string(),
                txn.category.clone(),
                format!("{prefix}{}", format_amount(&txn.amount_value(), ctx.locale)),
                txn.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut out = String::new();
    write_table(
        &mut out,
        &["Date", "Account", "Type", "Category", "Amount", "Note"],
        &rows,
    );
    print!("{out}");
    Ok(())
}
