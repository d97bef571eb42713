//! `tally account` - manage accounts.

use anyhow::{bail, Result};
use clap::Subcommand;
use tally_core::{currency_for, format_amount, Account, DecimalAmount};
use tally_store::Ledger;
use tracing::info;

use crate::cmd::Context;
use crate::report::write_table;

/// Account subcommands.
#[derive(Subcommand, Debug)]
pub enum AccountCmd {
    /// Create a new account.
    Add {
        /// Account name.
        name: String,
        /// Currency code, e.g. USD or EUR.
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Display icon.
        #[arg(long, default_value = "💰")]
        icon: String,
    },
    /// List accounts with their balances.
    List,
}

/// Run an account subcommand.
pub fn run(cmd: &AccountCmd, ctx: &Context) -> Result<()> {
    match cmd {
        AccountCmd::Add {
            name,
            currency,
            icon,
        } => add(ctx, name, currency, icon),
        AccountCmd::List => list(ctx),
    }
}

fn add(ctx: &Context, name: &str, currency: &str, icon: &str) -> Result<()> {
    if currency_for(currency).is_none() {
        bail!("unknown currency code: {currency}");
    }
    let mut ledger = Ledger::load(&ctx.store)?;
    if ledger.account_by_name(name).is_some() {
        bail!("an account named {name:?} already exists");
    }

    let account = Account::new(name, currency, icon);
    info!(id = %account.id, "account created");
    println!("Created account {} {} ({})", account.icon, account.name, account.currency);
    ledger.accounts.push(account);
    ledger.save(&ctx.store)?;
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let ledger = Ledger::load(&ctx.store)?;
    if ledger.accounts.is_empty() {
        println!("No accounts yet. Create one with: tally account add <name>");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ledger
        .accounts
        .iter()
        .map(|account| {
            let balance = ledger.balance(&account.id);
            let display = DecimalAmount::from_decimal(balance);
            let sign = if balance.is_sign_negative() { "-" } else { "" };
            vec![
                format!("{} {}", account.icon, account.name),
                account.currency.clone(),
                format!("{sign}{}", format_amount(&display, ctx.locale)),
            ]
        })
        .collect();

    let mut out = String::new();
    write_table(&mut out, &["Account", "Currency", "Balance"], &rows);
    print!("{out}");
    Ok(())
}
