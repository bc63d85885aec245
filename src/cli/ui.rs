use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::rates::parse_timestamp;
use crate::tools::ToolFailure;

pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned numeric cell.
pub fn number_cell(value: f64, precision: usize) -> Cell {
    Cell::new(format!("{value:.precision$}")).set_alignment(CellAlignment::Right)
}

/// Spinner shown on stderr while a provider call is in flight. Hidden when disabled.
pub fn new_spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Renders a provider timestamp as `YYYY-MM-DD HH:MM UTC`, or as-is if unparseable.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

pub fn updated_line(raw: &str) -> String {
    style_text(
        &format!("Rates updated: {}", format_timestamp(raw)),
        StyleType::Subtle,
    )
}

/// Human readable rendering of a failed tool call.
pub fn failure_text<E>(failure: &ToolFailure<E>) -> String {
    let mut output = format!(
        "{} {}",
        style_text("Error:", StyleType::Label),
        style_text(&failure.error, StyleType::Error)
    );
    if let Some(sample) = &failure.available_currencies_sample {
        output.push_str(&format!("\nAvailable currencies include: {}", sample.join(", ")));
    }
    if let Some(timestamp) = &failure.timestamp {
        output.push('\n');
        output.push_str(&updated_line(timestamp));
    }
    output
}
