//! Terminal tables

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use entiform_core::{Row, get_path};
use entiform_schema::{Schema, default_cell_text};

/// A table with the shared preset
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One column per top-level schema field, cells rendered by field kind
pub fn rows_table(schema: &Schema, rows: &[Row]) -> Table {
    let columns = schema.table_schema();
    let mut table = new_table();
    table.set_header(columns.iter().map(|c| c.title().to_string()));
    for row in rows {
        table.add_row(columns.iter().map(|column| {
            let field = schema.get(&column.key);
            default_cell_text(field, get_path(row, &column.key))
        }));
    }
    table
}
