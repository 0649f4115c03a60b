//! Symbol catalogue listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use optcrypto_types::symbol::SymbolCategory;

use crate::state::AppState;

/// Print every catalogue entry with its category.
pub fn list_catalogue(state: &AppState, json: bool) -> Result<()> {
    let catalogue = state.runtime.catalogue();
    let entries = catalogue.entries();

    if json {
        let report = serde_json::json!({
            "init": catalogue.init(),
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Symbol").fg(Color::White),
        Cell::new("Category").fg(Color::White),
    ]);

    for entry in entries {
        let name = if entry.name == catalogue.init() {
            format!("{} (init)", entry.name)
        } else {
            entry.name.to_string()
        };
        let category = match entry.category {
            SymbolCategory::Generic => Cell::new(entry.category.to_string()).fg(Color::Cyan),
            SymbolCategory::Specific => Cell::new(entry.category.to_string()).fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(name), category]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} generic, {} specific",
        style(catalogue.generic().count()).bold(),
        style(catalogue.specific().count()).bold()
    );
    println!();

    Ok(())
}
