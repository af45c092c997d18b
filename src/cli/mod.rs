use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{LedgerError, LedgerService};

/// Passbook - Flat-file Account Ledger
#[derive(Parser)]
#[command(name = "passbook")]
#[command(about = "A flat-file bank account ledger for the command line")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, default_value = "atm.csv")]
    pub file: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty ledger file
    Init,

    /// Look up an account and show its balance
    Balance {
        /// Account holder's first name
        first_name: String,

        /// Account holder's last name
        last_name: String,

        /// Account PIN (prompted without echo if omitted)
        #[arg(short, long)]
        pin: Option<String>,
    },

    /// Deposit funds into an account
    Deposit {
        /// Amount in whole units (e.g. "50")
        amount: String,

        /// Account holder's first name
        first_name: String,

        /// Account holder's last name
        last_name: String,

        /// Account PIN (prompted without echo if omitted)
        #[arg(short, long)]
        pin: Option<String>,
    },

    /// Withdraw funds from an account
    Withdraw {
        /// Amount in whole units (e.g. "40")
        amount: String,

        /// Account holder's first name
        first_name: String,

        /// Account holder's last name
        last_name: String,

        /// Account PIN (prompted without echo if omitted)
        #[arg(short, long)]
        pin: Option<String>,
    },

    /// Create a new account with a zero balance
    Create {
        /// Account holder's first name
        first_name: String,

        /// Account holder's last name
        last_name: String,

        /// Account PIN (prompted without echo if omitted)
        #[arg(short, long)]
        pin: Option<String>,
    },

    /// List account holders and balances in file order
    List,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let service = LedgerService::open(&self.file);

        match self.command {
            Commands::Init => {
                service.init()?;
                println!("Created ledger file: {}", self.file);
            }

            Commands::Balance {
                first_name,
                last_name,
                pin,
            } => {
                let pin = resolve_pin(pin)?;
                run_balance_command(&service, &first_name, &last_name, &pin)?;
            }

            Commands::Deposit {
                amount,
                first_name,
                last_name,
                pin,
            } => {
                let pin = resolve_pin(pin)?;
                let session = service.find_account(&first_name, &last_name, &pin)?;
                let session = service.deposit(&session, &amount)?;
                println!("New balance: ${}", session.balance);
            }

            Commands::Withdraw {
                amount,
                first_name,
                last_name,
                pin,
            } => {
                let pin = resolve_pin(pin)?;
                let session = service.find_account(&first_name, &last_name, &pin)?;
                let session = service.withdraw(&session, &amount)?;
                println!("New balance: ${}", session.balance);
            }

            Commands::Create {
                first_name,
                last_name,
                pin,
            } => {
                let pin = resolve_pin(pin)?;
                let account = service.create_account(&first_name, &last_name, &pin)?;
                println!(
                    "Account created for {} {}",
                    account.first_name, account.last_name
                );
            }

            Commands::List => {
                run_list_command(&service)?;
            }
        }

        Ok(())
    }
}

fn run_balance_command(
    service: &LedgerService,
    first_name: &str,
    last_name: &str,
    pin: &str,
) -> Result<()> {
    match service.find_account(first_name, last_name, pin) {
        Ok(session) => {
            println!("Account balance: ${}", session.balance);
        }
        Err(LedgerError::AccountNotFound { .. }) => {
            if confirm("Account not found. Would you like to create an account?")? {
                let account = service.create_account(first_name, last_name, pin)?;
                println!(
                    "Account created for {} {}",
                    account.first_name, account.last_name
                );
            } else {
                println!("Account creation cancelled");
            }
        }
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

fn run_list_command(service: &LedgerService) -> Result<()> {
    let accounts = service.list_accounts()?;
    if accounts.is_empty() {
        println!("No accounts found.");
    } else {
        println!("{:<20} {:<20} {:>12}", "FIRST NAME", "LAST NAME", "BALANCE");
        println!("{}", "-".repeat(54));
        for account in accounts {
            println!(
                "{:<20} {:<20} {:>12}",
                account.first_name, account.last_name, account.balance
            );
        }
    }
    Ok(())
}

/// Use the PIN passed on the command line, or read it from the terminal
/// with echo disabled.
fn resolve_pin(pin: Option<String>) -> Result<String> {
    match pin {
        Some(pin) => Ok(pin),
        None => rpassword::prompt_password("PIN: ").context("Could not read PIN from stdin"),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
