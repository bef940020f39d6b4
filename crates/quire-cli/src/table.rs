//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

/// Respects the `NO_COLOR` convention.
fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Creates a styled table with a bold header row.
pub fn styled_table(columns: &[&str]) -> Table {
    let mut table = Table::new();

    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|col| {
            if no_color() {
                Cell::new(col)
            } else {
                Cell::new(col).add_attribute(Attribute::Bold).fg(Color::Cyan)
            }
        })
        .collect();
    table.set_header(header_cells);

    table
}

/// A cell rendering an allow/deny verdict.
pub fn verdict_cell(allowed: bool) -> Cell {
    let (text, color) = if allowed {
        ("ALLOW", Color::Green)
    } else {
        ("DENY", Color::Red)
    };
    if no_color() {
        Cell::new(text)
    } else {
        Cell::new(text).fg(color)
    }
}
