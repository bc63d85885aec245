use super::{print_json, ui};
use crate::core::{ExchangeRateRequest, RateProvider};
use crate::tools::{ExchangeRate, ToolResult, exchange_rate};
use anyhow::Result;
use comfy_table::Cell;

impl ExchangeRate {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Pair"),
            ui::header_cell("Rate"),
            ui::header_cell("Inverse"),
        ]);
        table.add_row(vec![
            Cell::new(format!("{}/{}", self.base_currency, self.target_currency)),
            ui::number_cell(self.exchange_rate, 4),
            ui::number_cell(self.inverse_rate, 6),
        ]);

        let mut output = format!(
            "1 {} = {} {}\n\n",
            ui::style_text(self.base_currency.as_str(), ui::StyleType::Label),
            ui::style_text(&self.exchange_rate.to_string(), ui::StyleType::Value),
            ui::style_text(self.target_currency.as_str(), ui::StyleType::Label),
        );
        output.push_str(&table.to_string());
        output.push_str("\n\n");
        output.push_str(&ui::updated_line(&self.timestamp));
        output
    }
}

/// Looks up a rate and prints it. Returns whether the lookup succeeded.
pub async fn run(
    provider: &dyn RateProvider,
    request: &ExchangeRateRequest,
    json: bool,
) -> Result<bool> {
    let pb = ui::new_spinner("Fetching exchange rate...", !json);
    let result = exchange_rate::get_exchange_rate(provider, request).await;
    pb.finish_and_clear();

    if json {
        print_json(&result)?;
        return Ok(result.is_success());
    }

    match &result {
        ToolResult::Success(rate) => println!("{}", rate.display_as_table()),
        ToolResult::Failure(failure) => eprintln!("{}", ui::failure_text(failure)),
    }
    Ok(result.is_success())
}
