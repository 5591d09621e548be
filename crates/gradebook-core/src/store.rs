//! The gradebook aggregate.
//!
//! [`GradeStore`] owns the assignments, the students, and the grade matrix
//! between them. Every assignment keeps one grade per enrolled student, so
//! the matrix is always complete once both sides exist.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use crate::error::{EntityKind, GradebookError, Result};
use crate::model::{Assignment, Student};
use crate::parser::{self, ApplySummary};
use crate::statistics::{self, AssignmentStats};

/// One assignment together with its grade row, keyed by username.
#[derive(Debug, Clone, PartialEq)]
struct AssignmentEntry {
    assignment: Assignment,
    grades: BTreeMap<String, f64>,
}

/// In-memory gradebook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeStore {
    /// Assignments in insertion order.
    entries: Vec<AssignmentEntry>,
    /// Assignment name to position in `entries`.
    by_name: HashMap<String, usize>,
    /// Students keyed (and iterated) by username.
    students: BTreeMap<String, Student>,
    /// Sum of `percent_of_grade` over all assignments.
    total_percent: f64,
}

impl GradeStore {
    /// An empty gradebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a gradebook from a file in any of the record formats.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut store = Self::new();
        store.process_file(path)?;
        Ok(store)
    }

    /// Apply the records in `input` to this gradebook.
    ///
    /// The whole input is parsed and applied to a copy first; on any error
    /// the gradebook is left exactly as it was.
    pub fn process_str(&mut self, input: &str) -> Result<ApplySummary> {
        let mutations = parser::parse(input)?;
        let mut staged = self.clone();
        let summary = parser::apply(&mut staged, mutations)?;
        *self = staged;
        tracing::debug!(
            assignments = summary.assignments_added,
            students = summary.students_added,
            grades = summary.grades_changed,
            rejected = summary.grades_rejected,
            "applied record batch"
        );
        Ok(summary)
    }

    /// Apply the records stored in `path` to this gradebook.
    pub fn process_file(&mut self, path: &Path) -> Result<ApplySummary> {
        let content = std::fs::read_to_string(path)?;
        let summary = self.process_str(&content)?;
        tracing::info!("loaded records from {}", path.display());
        Ok(summary)
    }

    /// Write the `GRADEBOOK` snapshot to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut snapshot = self.output_gradebook();
        snapshot.push('\n');
        std::fs::write(path, snapshot)?;
        tracing::info!("saved gradebook to {}", path.display());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append an assignment, giving every current student a grade of 0.
    pub fn add_assignment(&mut self, assignment: Assignment) -> Result<()> {
        if self.by_name.contains_key(&assignment.name) {
            return Err(GradebookError::Duplicate {
                kind: EntityKind::Assignment,
                name: assignment.name,
            });
        }

        let grades = self
            .students
            .keys()
            .map(|username| (username.clone(), 0.0))
            .collect();

        self.total_percent += assignment.percent_of_grade;
        self.by_name.insert(assignment.name.clone(), self.entries.len());
        self.entries.push(AssignmentEntry { assignment, grades });
        Ok(())
    }

    /// Enroll a student with a grade of 0 on every existing assignment.
    pub fn add_student(&mut self, student: Student) -> Result<()> {
        if self.students.contains_key(&student.username) {
            return Err(GradebookError::Duplicate {
                kind: EntityKind::Student,
                name: student.username,
            });
        }

        for entry in &mut self.entries {
            entry.grades.insert(student.username.clone(), 0.0);
        }
        self.students.insert(student.username.clone(), student);
        Ok(())
    }

    /// Set `username`'s grade on `assignment_name`.
    ///
    /// Returns `false` without changing anything if either name is unknown
    /// or `new_grade` is outside `[0, total_points]`.
    pub fn change_grade(&mut self, assignment_name: &str, username: &str, new_grade: f64) -> bool {
        let Some(&index) = self.by_name.get(assignment_name) else {
            return false;
        };
        let entry = &mut self.entries[index];
        if !entry.assignment.accepts(new_grade) {
            return false;
        }
        match entry.grades.get_mut(username) {
            Some(grade) => {
                *grade = new_grade;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Assignments in insertion order.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter().map(|e| &e.assignment)
    }

    /// Students in username order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn assignment(&self, name: &str) -> Option<&Assignment> {
        self.entry(name).ok().map(|e| &e.assignment)
    }

    pub fn student(&self, username: &str) -> Option<&Student> {
        self.students.get(username)
    }

    /// Combined weight of every assignment added so far.
    pub fn total_percent(&self) -> f64 {
        self.total_percent
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.students.is_empty()
    }

    pub fn average(&self, assignment_name: &str) -> Result<f64> {
        let row = self.grade_row(assignment_name)?;
        statistics::mean(&row).ok_or_else(|| empty_row(assignment_name))
    }

    pub fn median(&self, assignment_name: &str) -> Result<f64> {
        let row = self.grade_row(assignment_name)?;
        statistics::median(&row).ok_or_else(|| empty_row(assignment_name))
    }

    pub fn min(&self, assignment_name: &str) -> Result<f64> {
        let row = self.grade_row(assignment_name)?;
        statistics::min(&row).ok_or_else(|| empty_row(assignment_name))
    }

    pub fn max(&self, assignment_name: &str) -> Result<f64> {
        let row = self.grade_row(assignment_name)?;
        statistics::max(&row).ok_or_else(|| empty_row(assignment_name))
    }

    /// Average, median, min, and max for one assignment.
    pub fn stats(&self, assignment_name: &str) -> Result<AssignmentStats> {
        let row = self.grade_row(assignment_name)?;
        AssignmentStats::compute(&row).ok_or_else(|| empty_row(assignment_name))
    }

    /// Weighted score for `username`, normalised by the percent of the
    /// semester covered so far.
    ///
    /// Fails with `EmptyCollection` while the total weight is zero.
    pub fn current_grade(&self, username: &str) -> Result<f64> {
        if !self.students.contains_key(username) {
            return Err(GradebookError::student_not_found(username));
        }
        if self.total_percent == 0.0 {
            return Err(GradebookError::EmptyCollection(
                "no weighted assignments to compute a current grade from".into(),
            ));
        }

        let weighted: f64 = self
            .entries
            .iter()
            .map(|e| {
                let grade = e.grades.get(username).copied().unwrap_or(0.0);
                grade / e.assignment.total_points * e.assignment.percent_of_grade
            })
            .sum();

        Ok(100.0 * weighted / self.total_percent)
    }

    /// Current grade of every student, keyed by username.
    pub fn current_grades(&self) -> Result<BTreeMap<String, f64>> {
        self.students
            .keys()
            .map(|username| Ok((username.clone(), self.current_grade(username)?)))
            .collect()
    }

    pub fn assignment_grade(&self, assignment_name: &str, username: &str) -> Result<f64> {
        let entry = self.entry(assignment_name)?;
        entry
            .grades
            .get(username)
            .copied()
            .ok_or_else(|| GradebookError::student_not_found(username))
    }

    /// `username`'s grades in assignment order.
    pub(crate) fn grades_for(&self, username: &str) -> Vec<f64> {
        self.entries
            .iter()
            .map(|e| e.grades.get(username).copied().unwrap_or(0.0))
            .collect()
    }

    fn entry(&self, assignment_name: &str) -> Result<&AssignmentEntry> {
        self.by_name
            .get(assignment_name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| GradebookError::assignment_not_found(assignment_name))
    }

    fn grade_row(&self, assignment_name: &str) -> Result<Vec<f64>> {
        let entry = self.entry(assignment_name)?;
        Ok(entry.grades.values().copied().collect())
    }
}

fn empty_row(assignment_name: &str) -> GradebookError {
    GradebookError::EmptyCollection(format!("no students graded on {assignment_name}"))
}

impl FromStr for GradeStore {
    type Err = GradebookError;

    fn from_str(s: &str) -> Result<Self> {
        let mut store = Self::new();
        store.process_str(s)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hw(name: &str, total: f64, percent: f64) -> Assignment {
        Assignment::new(name, total, percent)
    }

    fn student(username: &str) -> Student {
        Student::new(username, "First", "Last", "Advisor", 2025)
    }

    fn two_assignments_one_student() -> GradeStore {
        let mut store = GradeStore::new();
        store.add_assignment(hw("HW1", 100.0, 20.0)).unwrap();
        store.add_assignment(hw("HW2", 100.0, 30.0)).unwrap();
        store
            .add_student(Student::new("alice", "Alice", "A", "Advisor1", 2025))
            .unwrap();
        store
    }

    #[test]
    fn backfills_zero_in_either_order() {
        let mut store = GradeStore::new();
        store.add_assignment(hw("HW1", 10.0, 5.0)).unwrap();
        store.add_student(student("alice")).unwrap();
        store.add_student(student("bob")).unwrap();
        store.add_assignment(hw("HW2", 10.0, 5.0)).unwrap();

        for name in ["HW1", "HW2"] {
            for user in ["alice", "bob"] {
                assert_eq!(store.assignment_grade(name, user).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn total_percent_accumulates() {
        let store = two_assignments_one_student();
        assert_eq!(store.total_percent(), 50.0);
    }

    #[test]
    fn change_grade_accepts_bounds() {
        let mut store = two_assignments_one_student();
        assert!(store.change_grade("HW1", "alice", 0.0));
        assert!(store.change_grade("HW1", "alice", 100.0));
        assert_eq!(store.assignment_grade("HW1", "alice").unwrap(), 100.0);
    }

    #[test]
    fn change_grade_rejects_out_of_range() {
        let mut store = two_assignments_one_student();
        assert!(store.change_grade("HW1", "alice", 80.0));
        assert!(!store.change_grade("HW1", "alice", 150.0));
        assert!(!store.change_grade("HW1", "alice", -1.0));
        assert_eq!(store.assignment_grade("HW1", "alice").unwrap(), 80.0);
    }

    #[test]
    fn change_grade_rejects_unknown_names() {
        let mut store = two_assignments_one_student();
        assert!(!store.change_grade("HW9", "alice", 50.0));
        assert!(!store.change_grade("HW1", "mallory", 50.0));
        assert_eq!(store, two_assignments_one_student());
    }

    #[test]
    fn current_grade_weighted_example() {
        let mut store = two_assignments_one_student();
        assert!(store.change_grade("HW1", "alice", 80.0));
        assert!(store.change_grade("HW2", "alice", 90.0));
        let grade = store.current_grade("alice").unwrap();
        assert!((grade - 86.0).abs() < 1e-9, "expected 86.0, got {grade}");
    }

    #[test]
    fn current_grade_without_weight_is_empty_collection() {
        let mut store = GradeStore::new();
        store.add_student(student("alice")).unwrap();
        let err = store.current_grade("alice").unwrap_err();
        assert!(matches!(err, GradebookError::EmptyCollection(_)));

        store.add_assignment(hw("Survey", 1.0, 0.0)).unwrap();
        assert!(store.current_grade("alice").is_err());
    }

    #[test]
    fn current_grade_unknown_student() {
        let store = two_assignments_one_student();
        assert!(store.current_grade("mallory").unwrap_err().is_not_found());
    }

    #[test]
    fn current_grades_covers_every_student() {
        let mut store = two_assignments_one_student();
        store.add_student(student("bob")).unwrap();
        store.change_grade("HW1", "bob", 100.0);
        store.change_grade("HW2", "bob", 100.0);

        let grades = store.current_grades().unwrap();
        assert_eq!(grades.len(), 2);
        assert!((grades["bob"] - 100.0).abs() < 1e-9);
        assert_eq!(grades["alice"], 0.0);
    }

    #[test]
    fn statistics_over_row() {
        let mut store = GradeStore::new();
        store.add_assignment(hw("Quiz", 10.0, 10.0)).unwrap();
        for (user, grade) in [("a", 4.0), ("b", 10.0), ("c", 6.0), ("d", 8.0)] {
            store.add_student(student(user)).unwrap();
            assert!(store.change_grade("Quiz", user, grade));
        }

        assert_eq!(store.average("Quiz").unwrap(), 7.0);
        assert_eq!(store.median("Quiz").unwrap(), 7.0);
        assert_eq!(store.min("Quiz").unwrap(), 4.0);
        assert_eq!(store.max("Quiz").unwrap(), 10.0);

        store.add_student(student("e")).unwrap();
        assert_eq!(store.median("Quiz").unwrap(), 6.0);
        assert_eq!(store.min("Quiz").unwrap(), 0.0);
    }

    #[test]
    fn statistics_failure_modes() {
        let mut store = GradeStore::new();
        store.add_assignment(hw("HW1", 100.0, 20.0)).unwrap();

        for result in [
            store.average("HW1"),
            store.median("HW1"),
            store.min("HW1"),
            store.max("HW1"),
        ] {
            assert!(matches!(result, Err(GradebookError::EmptyCollection(_))));
        }

        for result in [
            store.average("nope"),
            store.median("nope"),
            store.min("nope"),
            store.max("nope"),
        ] {
            assert!(result.unwrap_err().is_not_found());
        }
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut store = two_assignments_one_student();
        let err = store.add_assignment(hw("HW1", 50.0, 50.0)).unwrap_err();
        assert!(matches!(err, GradebookError::Duplicate { .. }));
        assert_eq!(store.total_percent(), 50.0);

        let err = store.add_student(student("alice")).unwrap_err();
        assert!(matches!(err, GradebookError::Duplicate { .. }));
        assert_eq!(store.student("alice").unwrap().first_name, "Alice");
    }

    #[test]
    fn assignment_grade_unknown_keys() {
        let store = two_assignments_one_student();
        assert!(store.assignment_grade("HW9", "alice").unwrap_err().is_not_found());
        assert!(store.assignment_grade("HW1", "bob").unwrap_err().is_not_found());
    }

    #[test]
    fn failed_batch_leaves_store_untouched() {
        let mut store = two_assignments_one_student();
        let before = store.clone();
        let input = "ASSIGNMENT\nHW3\n50\n10\nASSIGNMENT\nHW1\n100\n5\n";
        assert!(store.process_str(input).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn save_and_load_file() {
        let mut store = two_assignments_one_student();
        store.change_grade("HW2", "alice", 72.5);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gradebook.txt");
        store.save(&path).unwrap();

        let loaded = GradeStore::from_file(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GradeStore::from_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GradebookError::Io(_)));
    }
}
