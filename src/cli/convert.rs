use super::{print_json, ui};
use crate::core::{ConvertCurrencyRequest, RateProvider};
use crate::tools::{Conversion, ToolResult, convert};
use anyhow::Result;

impl Conversion {
    pub fn display_summary(&self) -> String {
        format!(
            "{}\n{} 1 {} = {} {}\n{}",
            ui::style_text(&self.formatted_result, ui::StyleType::Value),
            ui::style_text("Rate used:", ui::StyleType::Label),
            self.original_currency,
            self.exchange_rate,
            self.target_currency,
            ui::updated_line(&self.timestamp)
        )
    }
}

/// Converts an amount and prints the result. Returns whether the conversion succeeded.
pub async fn run(
    provider: &dyn RateProvider,
    request: &ConvertCurrencyRequest,
    json: bool,
) -> Result<bool> {
    let pb = ui::new_spinner("Converting...", !json);
    let result = convert::convert_currency(provider, request).await;
    pb.finish_and_clear();

    if json {
        print_json(&result)?;
        return Ok(result.is_success());
    }

    match &result {
        ToolResult::Success(conversion) => println!("{}", conversion.display_summary()),
        ToolResult::Failure(failure) => eprintln!("{}", ui::failure_text(failure)),
    }
    Ok(result.is_success())
}
