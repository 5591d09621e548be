pub mod add;
pub mod grade;
pub mod import;
pub mod init;
pub mod report;
pub mod show;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};

use gradebook_core::GradeStore;

/// Load the gradebook at `path`.
pub(crate) fn load_store(path: &Path) -> Result<GradeStore> {
    GradeStore::from_file(path)
        .with_context(|| format!("failed to load gradebook: {}", path.display()))
}

/// Load the gradebook at `path`, or start an empty one if the file is absent.
pub(crate) fn load_or_new(path: &Path) -> Result<GradeStore> {
    if path.exists() {
        load_store(path)
    } else {
        Ok(GradeStore::new())
    }
}

/// Write the gradebook back, unless autosave is off.
pub(crate) fn save_store(store: &GradeStore, path: &Path, autosave: bool) -> Result<()> {
    if !autosave {
        println!("Autosave is disabled; changes were not written.");
        return Ok(());
    }
    store
        .save(path)
        .with_context(|| format!("failed to save gradebook: {}", path.display()))
}
