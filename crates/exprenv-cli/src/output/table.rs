//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// One evaluation variable, ready for display.
pub struct VariableRow {
    /// Variable name (e.g., "dates", "root").
    pub name: String,
    /// Short kind name (e.g., "helper", "number").
    pub kind: &'static str,
    /// Human-readable summary of the value.
    pub summary: String,
}

/// Format evaluation variables as a table.
pub fn format_variables_table(rows: &[VariableRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Variable", "Kind", "Value"]);

    for row in rows {
        table.add_row(vec![row.name.clone(), row.kind.to_string(), row.summary.clone()]);
    }

    table
}
