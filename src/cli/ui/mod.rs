mod colors;

pub use colors::{apply_inquire_theme, error, highlight, info, success, warning};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}
