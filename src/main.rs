use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use currex::core::config::process_env;
use currex::core::log::init_logging;
use currex::{AppCommand, RunOptions};
use std::io::Read;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print tool results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the exchange rate between two currencies
    Rate {
        /// Base currency code, e.g. USD
        base: String,
        /// Target currency code, e.g. RUB
        target: String,
    },
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
    },
    /// List available currencies
    List,
    /// Describe the available tools
    Tools,
    /// Run a JSON tool call read from stdin
    Call,
}

impl TryFrom<Commands> for AppCommand {
    type Error = anyhow::Error;

    fn try_from(cmd: Commands) -> Result<AppCommand> {
        Ok(match cmd {
            Commands::Rate { base, target } => AppCommand::Rate { base, target },
            Commands::Convert { amount, from, to } => AppCommand::Convert { amount, from, to },
            Commands::List => AppCommand::List,
            Commands::Tools => AppCommand::Tools,
            Commands::Call => {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .context("Failed to read tool call from stdin")?;
                AppCommand::Call(input)
            }
            Commands::Setup => anyhow::bail!("Setup command is handled separately"),
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = RunOptions {
        config_path: cli.config_path.as_deref(),
        json: cli.json,
        env: process_env,
    };

    let result = match cli.command {
        Some(Commands::Setup) => currex::cli::setup::setup().map(|_| true),
        Some(cmd) => match AppCommand::try_from(cmd) {
            Ok(command) => currex::run_command(command, options).await,
            Err(e) => Err(e),
        },
        None => {
            Cli::command().print_help()?;
            Ok(true)
        }
    };

    match result {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            Err(e)
        }
    }
}
