//! The `gradebook student`, `gradebook assignment`, and `gradebook current`
//! report commands.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::report::format_number;

pub fn student(path: &Path, username: &str) -> Result<()> {
    let store = super::load_store(path)?;
    println!("{}", store.output_student_grades(username)?);
    Ok(())
}

pub fn assignment(path: &Path, name: &str) -> Result<()> {
    let store = super::load_store(path)?;
    println!("{}", store.output_assignment_grades(name)?);
    Ok(())
}

pub fn current(path: &Path, format: &str) -> Result<()> {
    let store = super::load_store(path)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&store.current_grades()?)?);
        }
        "table" => {
            let mut table = Table::new();
            table.set_header(vec!["Username", "Name", "Advisor", "Current Grade"]);

            let grades = store.current_grades()?;
            for s in store.students() {
                let grade = grades.get(&s.username).copied().unwrap_or(0.0);
                table.add_row(vec![
                    Cell::new(&s.username),
                    Cell::new(format!("{} {}", s.first_name, s.last_name)),
                    Cell::new(&s.advisor),
                    Cell::new(format!("{grade:.2}")),
                ]);
            }

            println!("{table}");
            println!("Percent of semester graded: {}", format_number(store.total_percent()));
        }
        _ => println!("{}", store.output_current_grades()?),
    }

    Ok(())
}
