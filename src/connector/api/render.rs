//! Plain-text rendering of conversation turns and comparison tables.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::{ChatMessage, ComparisonData};

/// Spinner shown on stderr while a model request is outstanding.
pub fn waiting_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn format_message(message: &ChatMessage) -> String {
    let mut output = format!(
        "[{}] {}: {}",
        message.timestamp().format("%H:%M"),
        message.role(),
        message.text()
    );

    if message.has_image() {
        output.push_str(" [image]");
    }

    if !message.grounding_links().is_empty() {
        output.push_str("\n  Sources:");
        for (i, link) in message.grounding_links().iter().enumerate() {
            match link.uri() {
                Some(uri) => output.push_str(&format!("\n    {}. {} <{}>", i + 1, link.title(), uri)),
                None => output.push_str(&format!("\n    {}. {}", i + 1, link.title())),
            }
        }
    }

    output
}

pub fn format_comparison(data: &ComparisonData) -> String {
    const FEATURE_HEADER: &str = "Feature";

    let rows: Vec<[&str; 3]> = data
        .rows()
        .map(|r| [r.feature, r.car1_value, r.car2_value])
        .collect();
    let header = [FEATURE_HEADER, data.car1().name(), data.car2().name()];

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: &[&str; 3]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = render_row(&header);
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        output.push('\n');
        output.push_str(&render_row(row));
    }

    output
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}
