//! The `gradebook init` command.

use std::path::Path;

use anyhow::Result;

use gradebook_core::GradeStore;

pub fn execute(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }

    super::save_store(&GradeStore::new(), path, true)?;
    println!("Created {}", path.display());

    println!("\nNext steps:");
    println!("  1. Run: gradebook import assignments.txt students.txt");
    println!("  2. Run: gradebook grade <ASSIGNMENT> <USERNAME> <GRADE>");
    println!("  3. Run: gradebook current --format table");

    Ok(())
}
