//! `tally calc` - interactive amount calculator.
//!
//! Reads keystrokes line by line: digits, separators and operators are fed
//! to the session in order, so `2+3=` evaluates in one line or across
//! several. Dot-commands control the session itself (`.ok`, `.cancel`);
//! anything else, including a leading `.5`, is plain key input.

use anyhow::Result;
use clap::Args;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tally_calc::{Key, Session};
use tally_core::{format_amount, DecimalAmount};

use crate::cmd::Context;

/// Arguments for the calculator.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Seed value, e.g. a previous amount to adjust.
    pub initial: Option<String>,
}

/// A REPL control line, as opposed to calculator key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand {
    Commit,
    Cancel,
    Clear,
    Help,
}

impl ReplCommand {
    /// Recognize a dot-command line. Dot-lines that are not commands (like
    /// `.5` starting a decimal operand) are key input, not errors.
    fn parse(line: &str) -> Option<Self> {
        match line.strip_prefix('.')?.to_lowercase().as_str() {
            "ok" | "commit" => Some(Self::Commit),
            "cancel" | "quit" | "exit" => Some(Self::Cancel),
            "clear" => Some(Self::Clear),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Run the calculator standalone.
pub fn run(args: &CalcArgs, ctx: &Context) -> Result<()> {
    match run_session(ctx, args.initial.as_deref().unwrap_or_default())? {
        Some(amount) => println!("{}", format_amount(&amount, ctx.locale)),
        None => println!("(cancelled)"),
    }
    Ok(())
}

/// Drive a calculator session to completion.
///
/// Returns the committed amount, already validated against the context's
/// policy, or `None` if the user cancelled.
pub fn run_session(ctx: &Context, initial: &str) -> Result<Option<DecimalAmount>> {
    let mut session = Session::with_initial(ctx.policy.clone(), ctx.locale, initial);
    let mut rl = DefaultEditor::new()?;

    println!("Keys: 0-9 . + - * / = | .ok commits, .cancel quits, .help lists commands");
    print_state(&session);

    loop {
        let readline = rl.readline("calc> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    print_state(&session);
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match ReplCommand::parse(line) {
                    Some(ReplCommand::Commit) => {
                        if let Some(amount) = session.commit_value() {
                            return Ok(Some(amount));
                        }
                        print_state(&session);
                    }
                    Some(ReplCommand::Cancel) => return Ok(None),
                    Some(ReplCommand::Clear) => {
                        session.press(Key::Clear);
                        print_state(&session);
                    }
                    Some(ReplCommand::Help) => print_help(),
                    None => {
                        for c in line.chars() {
                            match Key::from_char(c) {
                                Some(key) => session.press(key),
                                None if c.is_whitespace() => {}
                                None => eprintln!("ignored: {c:?}"),
                            }
                        }
                        print_state(&session);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("(interrupted)");
                return Ok(None);
            }
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => {
                eprintln!("error: {err}");
                return Ok(None);
            }
        }
    }
}

fn print_state(session: &Session) {
    if let Some(pending) = session.pending_line() {
        println!("  {pending}");
    }
    println!("  {}", session.display());
    if let Some(err) = session.error() {
        eprintln!("  error: {err}");
    }
}

fn print_help() {
    println!(".ok      commit the current value and exit");
    println!(".cancel  exit without a value");
    println!(".clear   reset the session");
    println!("<        backspace");
    println!("Anything else is fed to the calculator key by key.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_recognition() {
        assert_eq!(ReplCommand::parse(".ok"), Some(ReplCommand::Commit));
        assert_eq!(ReplCommand::parse(".COMMIT"), Some(ReplCommand::Commit));
        assert_eq!(ReplCommand::parse(".cancel"), Some(ReplCommand::Cancel));
        assert_eq!(ReplCommand::parse(".clear"), Some(ReplCommand::Clear));
        assert_eq!(ReplCommand::parse(".help"), Some(ReplCommand::Help));
    }

    #[test]
    fn test_dot_digit_is_key_input_not_command() {
        assert_eq!(ReplCommand::parse(".5"), None);
        assert_eq!(ReplCommand::parse(".05"), None);
        assert_eq!(ReplCommand::parse("12.5"), None);
    }
}
