use super::{print_json, ui};
use crate::core::RateProvider;
use crate::tools::{CurrencyListing, ToolResult, list};
use anyhow::Result;
use comfy_table::Cell;

impl CurrencyListing {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code"),
            ui::header_cell("Name"),
            ui::header_cell(&format!("Rate ({})", self.base_currency)),
        ]);

        for entry in &self.currencies {
            table.add_row(vec![
                Cell::new(&entry.code),
                Cell::new(&entry.name),
                ui::number_cell(entry.rate_to_usd, 4),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Available currencies", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nShowing {} of {} currencies",
            ui::style_text(&self.currencies.len().to_string(), ui::StyleType::Label),
            ui::style_text(&self.total_currencies.to_string(), ui::StyleType::Label),
        ));
        output.push('\n');
        output.push_str(&ui::updated_line(&self.timestamp));
        output
    }
}

/// Lists currencies and prints them. Returns whether the listing succeeded.
pub async fn run(provider: &dyn RateProvider, json: bool) -> Result<bool> {
    let pb = ui::new_spinner("Fetching currencies...", !json);
    let result = list::list_available_currencies(provider).await;
    pb.finish_and_clear();

    if json {
        print_json(&result)?;
        return Ok(result.is_success());
    }

    match &result {
        ToolResult::Success(listing) => println!("{}", listing.display_as_table()),
        ToolResult::Failure(failure) => eprintln!("{}", ui::failure_text(failure)),
    }
    Ok(result.is_success())
}
