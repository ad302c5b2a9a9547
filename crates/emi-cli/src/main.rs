mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;

use commands::emi::{EmiArgs, ScheduleArgs};
use commands::loan::{LoanArgs, ValidateArgs};

/// Loan EMI and amortization calculations
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and amortization calculations",
    long_about = "A CLI for loan EMI calculations with decimal precision. Supports \
                  plain EMI, month-by-month amortization schedules with prepayment, \
                  and car, home and personal loan variants."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the EMI, total interest and total amount
    Emi(EmiArgs),
    /// Build the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Run a full loan report (generic, car, home or personal)
    Loan(LoanArgs),
    /// Validate loan inputs and list every violation
    Validate(ValidateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let validating = matches!(cli.command, Commands::Validate(_));
    let result: Result<Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Schedule(args) => commands::emi::run_schedule(args),
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Validate(args) => commands::loan::run_validate(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            let rejected = validating && value.get("valid") == Some(&Value::Bool(false));
            process::exit(if rejected { 1 } else { 0 });
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
