//! The `gradebook import` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub fn execute(path: &Path, inputs: &[PathBuf], autosave: bool) -> Result<()> {
    let mut store = super::load_or_new(path)?;

    for input in inputs {
        let summary = store
            .process_file(input)
            .with_context(|| format!("failed to import {}", input.display()))?;

        println!(
            "{}: {} assignments, {} students, {} grades",
            input.display(),
            summary.assignments_added,
            summary.students_added,
            summary.grades_changed
        );
        if summary.grades_rejected > 0 {
            println!("  {} grade change(s) rejected", summary.grades_rejected);
        }
    }

    super::save_store(&store, path, autosave)
}
