//! The `gradebook stats` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn execute(path: &Path, assignment: &str) -> Result<()> {
    let store = super::load_store(path)?;
    let stats = store.stats(assignment)?;

    let mut table = Table::new();
    table.set_header(vec!["Assignment", "Average", "Median", "Min", "Max"]);
    table.add_row(vec![
        Cell::new(assignment),
        Cell::new(format!("{:.2}", stats.average)),
        Cell::new(format!("{:.2}", stats.median)),
        Cell::new(format!("{:.2}", stats.min)),
        Cell::new(format!("{:.2}", stats.max)),
    ]);

    println!("{table}");
    Ok(())
}
