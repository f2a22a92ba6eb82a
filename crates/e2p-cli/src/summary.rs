use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::RunSummary;

/// Print the run summary to stderr; stdout may carry the PDF.
pub fn print_summary(summary: &RunSummary) {
    eprintln!("Input: {}", summary.input);
    eprintln!("Output: {}", summary.output);
    eprintln!("{}", summary_table(summary));
    if !summary.cover_warnings.is_empty() {
        eprintln!("Cover page:");
        for warning in &summary.cover_warnings {
            eprintln!("- {warning}");
        }
    }
}

/// Per-section event counts with a total row.
pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header_cell("Section"), header_cell("Events")]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for section in &summary.sections {
        let count = if section.events == 0 {
            Cell::new(section.events).add_attribute(Attribute::Dim)
        } else {
            Cell::new(section.events)
        };
        table.add_row(vec![Cell::new(&section.label), count]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.events_kept()).add_attribute(Attribute::Bold),
    ]);
    let skipped = summary.events_loaded.saturating_sub(summary.events_kept());
    if skipped > 0 {
        table.add_row(vec![
            Cell::new("Filtered out").add_attribute(Attribute::Dim),
            Cell::new(skipped).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}
