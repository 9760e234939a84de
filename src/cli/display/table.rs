//! Table builder wrapper around comfy-table for section listings.

use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::cli::commands::query::EntryView;

/// Create a borderless table of `key`, `value` and `defined at` columns.
///
/// Inherited entries are marked with `*` after the key.
pub fn entries_table(entries: &[EntryView]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["KEY", "VALUE", "DEFINED AT"].iter().map(|h| {
            Cell::new(h)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Left)
        }));

    for entry in entries {
        let key = if entry.inherited {
            format!("{}*", entry.key)
        } else {
            entry.key.clone()
        };
        table.add_row(vec![
            Cell::new(key),
            Cell::new(&entry.value),
            Cell::new(&entry.defined_at),
        ]);
    }
    table
}

/// Render one section as a `[name]` heading followed by its table.
pub fn render_section(name: &str, entries: &[EntryView]) -> String {
    if entries.is_empty() {
        return format!("[{name}]\n  (no entries)");
    }
    format!("[{name}]\n{}", entries_table(entries))
}
