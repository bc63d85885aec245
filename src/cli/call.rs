use super::{print_json, ui};
use crate::core::RateProvider;
use crate::tools::{ToolCall, ToolSpec, catalog};
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Prints the tool catalog, as JSON or as a table.
pub fn print_catalog(json: bool) -> Result<()> {
    let specs = catalog::catalog();
    if json {
        return print_json(&specs);
    }
    println!("{}", catalog_table(&specs));
    Ok(())
}

fn catalog_table(specs: &[ToolSpec]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Tool"),
        ui::header_cell("Description"),
        ui::header_cell("Required"),
    ]);
    for spec in specs {
        let required = spec.parameters["required"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(spec.name),
            Cell::new(spec.description),
            Cell::new(required),
        ]);
    }
    table.to_string()
}

/// Runs one JSON encoded tool call and prints the JSON result.
///
/// Input that is not a tool call at all is an error; everything else,
/// including unknown tools, produces a failure payload.
pub async fn run(provider: &dyn RateProvider, input: &str) -> Result<bool> {
    let call: ToolCall = serde_json::from_str(input.trim())
        .context("Expected a tool call like {\"tool\": \"...\", \"arguments\": {...}}")?;

    let output = catalog::dispatch(provider, &call).await;
    print_json(&output)?;
    Ok(output.is_success())
}
