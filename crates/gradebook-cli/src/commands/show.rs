//! The `gradebook show` command.

use std::path::Path;

use anyhow::Result;

pub fn execute(path: &Path, format: &str) -> Result<()> {
    let store = super::load_store(path)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&store.snapshot())?),
        _ => println!("{}", store.output_gradebook()),
    }

    Ok(())
}
