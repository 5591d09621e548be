//! The `gradebook add-assignment` and `gradebook add-student` commands.

use std::path::Path;

use anyhow::Result;

use gradebook_core::{Assignment, Student};

pub fn assignment(
    path: &Path,
    name: &str,
    total_points: f64,
    percent_of_grade: f64,
    autosave: bool,
) -> Result<()> {
    if !total_points.is_finite() || total_points <= 0.0 {
        anyhow::bail!("total points must be a positive number, got {total_points}");
    }
    if !percent_of_grade.is_finite() || percent_of_grade < 0.0 {
        anyhow::bail!("percent of grade must not be negative, got {percent_of_grade}");
    }

    let mut store = super::load_or_new(path)?;
    store.add_assignment(Assignment::new(name, total_points, percent_of_grade))?;

    println!("Added assignment {name} ({total_points} points, {percent_of_grade}% of grade)");
    super::save_store(&store, path, autosave)
}

pub fn student(path: &Path, student: Student, autosave: bool) -> Result<()> {
    let mut store = super::load_or_new(path)?;
    let username = student.username.clone();
    store.add_student(student)?;

    println!("Added student {username}");
    super::save_store(&store, path, autosave)
}
