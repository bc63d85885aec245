pub mod cli;
pub mod core;
pub mod providers;
pub mod tools;

use crate::core::config::{AppConfig, EnvLookup};
use crate::core::{ConvertCurrencyRequest, ExchangeRateRequest};
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub use crate::tools::CurrencyTools;

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rate { base: String, target: String },
    Convert { amount: f64, from: String, to: String },
    List,
    Tools,
    /// A JSON encoded tool call, as read from stdin.
    Call(String),
}

/// Options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    pub config_path: Option<&'a str>,
    pub json: bool,
    /// Source of provider overrides. `main` passes the process environment.
    pub env: EnvLookup,
}

impl Default for RunOptions<'_> {
    fn default() -> Self {
        RunOptions {
            config_path: None,
            json: false,
            env: |_| None,
        }
    }
}

/// Runs `command`. `Ok(false)` means the tool answered with a failure payload.
pub async fn run_command(command: AppCommand, options: RunOptions<'_>) -> Result<bool> {
    info!("currex starting...");

    match command {
        AppCommand::Tools => {
            cli::call::print_catalog(options.json)?;
            Ok(true)
        }
        AppCommand::Rate { base, target } => {
            let provider = build_provider(&options)?;
            let request = ExchangeRateRequest::new(base, target);
            cli::rate::run(&provider, &request, options.json).await
        }
        AppCommand::Convert { amount, from, to } => {
            let provider = build_provider(&options)?;
            let request = ConvertCurrencyRequest::new(amount, from, to);
            cli::convert::run(&provider, &request, options.json).await
        }
        AppCommand::List => {
            let provider = build_provider(&options)?;
            cli::list::run(&provider, options.json).await
        }
        AppCommand::Call(input) => {
            let provider = build_provider(&options)?;
            cli::call::run(&provider, &input).await
        }
    }
}

fn build_provider(options: &RunOptions<'_>) -> Result<ExchangeRateApiProvider> {
    let config = match options.config_path {
        Some(path) => AppConfig::load_from_path(path, options.env)?,
        None => AppConfig::load(options.env)?,
    };
    debug!(
        base_url = %config.provider.base_url,
        has_api_key = config.provider.api_key.is_some(),
        timeout_secs = config.provider.timeout_secs,
        "Loaded config"
    );
    Ok(ExchangeRateApiProvider::from_config(&config.provider))
}
