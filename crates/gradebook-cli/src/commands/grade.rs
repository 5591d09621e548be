//! The `gradebook grade` command.

use std::path::Path;

use anyhow::Result;

pub fn execute(
    path: &Path,
    assignment: &str,
    username: &str,
    grade: f64,
    autosave: bool,
) -> Result<()> {
    let mut store = super::load_store(path)?;

    if !store.change_grade(assignment, username, grade) {
        let reason = match store.assignment(assignment) {
            None => format!("unknown assignment {assignment:?}"),
            Some(_) if store.student(username).is_none() => {
                format!("unknown student {username:?}")
            }
            Some(a) => format!("grade must be between 0 and {}", a.total_points),
        };
        anyhow::bail!("grade change rejected: {reason}");
    }

    println!("{username} / {assignment} = {grade}");
    super::save_store(&store, path, autosave)
}
