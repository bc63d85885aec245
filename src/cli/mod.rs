//! Command line front-end for the currency tools

pub mod call;
pub mod convert;
pub mod list;
pub mod rate;
pub mod setup;
pub mod ui;

use anyhow::{Context, Result};
use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize tool result")?;
    println!("{json}");
    Ok(())
}
