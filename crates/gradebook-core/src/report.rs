//! Text reports and snapshots built from a [`GradeStore`].
//!
//! `GRADEBOOK` output is the inverse of [`crate::parser`]: feeding it back in
//! reconstructs an equal store. The other reports are read-only views.

use serde::Serialize;

use crate::error::{GradebookError, Result};
use crate::model::{Assignment, Student};
use crate::store::GradeStore;

const DIVIDER: &str = "----";

/// Left padding in the `GRADEBOOK` header rows, one tab per identity column
/// before the first grade column.
const HEADER_PADDING: &str = "\t\t\t\t";

/// Format a number the way reports print it: shortest round-trip form,
/// always with a fractional part (`80.0`, `72.5`).
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

/// A serializable copy of the whole gradebook.
#[derive(Debug, Clone, Serialize)]
pub struct GradebookSnapshot<'a> {
    pub assignments: Vec<&'a Assignment>,
    pub total_percent: f64,
    pub students: Vec<StudentRow<'a>>,
}

/// One student with grades listed in assignment order.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRow<'a> {
    #[serde(flatten)]
    pub student: &'a Student,
    pub grades: Vec<f64>,
}

impl GradeStore {
    /// The full gradebook in the `GRADEBOOK` record format.
    pub fn output_gradebook(&self) -> String {
        let mut out = String::from("GRADEBOOK");

        out.push('\n');
        out.push_str(HEADER_PADDING);
        for a in self.assignments() {
            out.push('\t');
            out.push_str(&a.name);
        }
        out.push('\n');
        out.push_str(HEADER_PADDING);
        for a in self.assignments() {
            out.push('\t');
            out.push_str(&format_number(a.total_points));
        }
        out.push('\n');
        out.push_str(HEADER_PADDING);
        for a in self.assignments() {
            out.push('\t');
            out.push_str(&format_number(a.percent_of_grade));
        }

        for s in self.students() {
            out.push_str(&format!(
                "\n{}\t{}\t{}\t{}\t{}",
                s.username, s.first_name, s.last_name, s.advisor, s.grad_year
            ));
            for grade in self.grades_for(&s.username) {
                out.push('\t');
                out.push_str(&format_number(grade));
            }
        }

        out
    }

    /// `STUDENT_GRADES` report: identity, one line per assignment, and the
    /// current grade.
    pub fn output_student_grades(&self, username: &str) -> Result<String> {
        let s = self
            .student(username)
            .ok_or_else(|| GradebookError::student_not_found(username))?;

        let mut out = String::from("STUDENT_GRADES");
        push_identity(&mut out, s);
        out.push('\n');
        out.push_str(DIVIDER);

        for (a, grade) in self.assignments().zip(self.grades_for(username)) {
            out.push_str(&format!("\n{}\t{}", a.name, format_number(grade)));
        }

        out.push_str(&format!(
            "\n{DIVIDER}\nCURRENT GRADE\t{}",
            format_number(self.current_grade(username)?)
        ));
        Ok(out)
    }

    /// `ASSIGNMENT_GRADES` report: the assignment, every student, and the
    /// row statistics.
    pub fn output_assignment_grades(&self, assignment_name: &str) -> Result<String> {
        let a = self
            .assignment(assignment_name)
            .ok_or_else(|| GradebookError::assignment_not_found(assignment_name))?;
        let stats = self.stats(assignment_name)?;

        let mut out = String::from("ASSIGNMENT_GRADES");
        out.push_str(&format!(
            "\n{}\n{}\n{}\n{DIVIDER}",
            a.name,
            format_number(a.total_points),
            format_number(a.percent_of_grade)
        ));

        for s in self.students() {
            push_identity(&mut out, s);
        }

        out.push_str(&format!(
            "\n{DIVIDER}\nSTATS\nAverage {}\nMedian {}\nMax {}\nMin {}",
            format_number(stats.average),
            format_number(stats.median),
            format_number(stats.max),
            format_number(stats.min)
        ));
        Ok(out)
    }

    /// `CURRENT_GRADES` report: one `username grade` line per student.
    pub fn output_current_grades(&self) -> Result<String> {
        let mut out = String::from("CURRENT_GRADES");
        for (username, grade) in self.current_grades()? {
            out.push_str(&format!("\n{username} {}", format_number(grade)));
        }
        Ok(out)
    }

    /// Borrowed snapshot for JSON export.
    pub fn snapshot(&self) -> GradebookSnapshot<'_> {
        GradebookSnapshot {
            assignments: self.assignments().collect(),
            total_percent: self.total_percent(),
            students: self
                .students()
                .map(|s| StudentRow {
                    student: s,
                    grades: self.grades_for(&s.username),
                })
                .collect(),
        }
    }
}

fn push_identity(out: &mut String, s: &Student) {
    out.push_str(&format!(
        "\n{}\n{}\n{}\n{}\n{}",
        s.username, s.first_name, s.last_name, s.advisor, s.grad_year
    ));
}
