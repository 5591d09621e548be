//! Core data model types for the gradebook.
//!
//! Assignments and students are plain values compared field by field. They
//! know nothing about each other; grades live in [`crate::GradeStore`].

use serde::Serialize;

/// A graded unit of coursework.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Unique assignment name.
    pub name: String,
    /// Maximum score a student can earn.
    pub total_points: f64,
    /// Weight of this assignment in the semester grade.
    pub percent_of_grade: f64,
}

impl Assignment {
    pub fn new(name: impl Into<String>, total_points: f64, percent_of_grade: f64) -> Self {
        Self {
            name: name.into(),
            total_points,
            percent_of_grade,
        }
    }

    /// Whether `grade` lies in `[0, total_points]`.
    pub fn accepts(&self, grade: f64) -> bool {
        (0.0..=self.total_points).contains(&grade)
    }
}

/// A student enrolled in the course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Student {
    /// Unique username.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub advisor: String,
    /// Expected graduation year.
    pub grad_year: i32,
}

impl Student {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        advisor: impl Into<String>,
        grad_year: i32,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            advisor: advisor.into(),
            grad_year,
        }
    }
}
