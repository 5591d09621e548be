//! End-to-end gradebook behaviour through the public API.
//!
//! Builds stores from record text the way a front end would, then checks the
//! grade matrix, the statistics, and snapshot round-trips.

use gradebook_core::{Assignment, GradeStore, GradebookError, Student};

const ASSIGNMENTS: &str = "ASSIGNMENT
HW1
100
20

ASSIGNMENT
HW2
100
30
";

const STUDENTS: &str = "STUDENT
alice
Alice
A
Advisor1
2025
STUDENT
carol
Carol
C
Advisor1
2027
STUDENT
bob
Bob
B
Advisor2
2026
";

fn loaded() -> GradeStore {
    let mut store = GradeStore::new();
    store.process_str(ASSIGNMENTS).unwrap();
    store.process_str(STUDENTS).unwrap();
    store
}

#[test]
fn every_pair_starts_at_zero_regardless_of_order() {
    let a_first = loaded();

    let mut s_first = GradeStore::new();
    s_first.process_str(STUDENTS).unwrap();
    s_first.process_str(ASSIGNMENTS).unwrap();

    for store in [&a_first, &s_first] {
        for a in ["HW1", "HW2"] {
            for s in ["alice", "bob", "carol"] {
                assert_eq!(store.assignment_grade(a, s).unwrap(), 0.0);
            }
        }
    }
}

#[test]
fn grades_for_student_records() {
    let mut store = loaded();
    let summary = store
        .process_str("GRADES_FOR_STUDENT\nalice\nHW1\n80\nHW2\n90\n")
        .unwrap();
    assert_eq!(summary.grades_changed, 2);

    let grade = store.current_grade("alice").unwrap();
    assert!((grade - 86.0).abs() < 1e-9, "expected 86.0, got {grade}");
}

#[test]
fn grades_for_assignment_records_and_stats() {
    let mut store = loaded();
    store
        .process_str("GRADES_FOR_ASSIGNMENT\nHW1\nalice\n90\nbob\n70\ncarol\n40\n")
        .unwrap();

    assert!((store.average("HW1").unwrap() - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(store.median("HW1").unwrap(), 70.0);
    assert_eq!(store.max("HW1").unwrap(), 90.0);
    assert_eq!(store.min("HW1").unwrap(), 40.0);
    assert_eq!(store.median("HW2").unwrap(), 0.0);
}

#[test]
fn out_of_range_change_keeps_prior_grade() {
    let mut store = loaded();
    assert!(store.change_grade("HW1", "alice", 55.0));
    let before = store.clone();

    assert!(!store.change_grade("HW1", "alice", 150.0));
    assert_eq!(store.assignment_grade("HW1", "alice").unwrap(), 55.0);
    assert_eq!(store, before);
}

#[test]
fn snapshot_roundtrip_preserves_everything() {
    let mut store = loaded();
    store
        .add_assignment(Assignment::new("Final Exam", 150.0, 35.5))
        .unwrap();
    store.change_grade("Final Exam", "bob", 123.25);
    store.change_grade("HW2", "carol", 99.9);

    let text = store.output_gradebook();
    let reparsed: GradeStore = text.parse().unwrap();

    assert_eq!(reparsed, store);
    assert_eq!(reparsed.output_gradebook(), text);
    assert_eq!(reparsed.total_percent(), store.total_percent());
}

#[test]
fn empty_store_roundtrip() {
    let store = GradeStore::new();
    let reparsed: GradeStore = store.output_gradebook().parse().unwrap();
    assert!(reparsed.is_empty());
}

#[test]
fn statistics_on_unknown_and_empty() {
    let mut store = GradeStore::new();
    store.add_assignment(Assignment::new("HW1", 10.0, 5.0)).unwrap();

    assert!(matches!(
        store.average("HW1"),
        Err(GradebookError::EmptyCollection(_))
    ));
    assert!(matches!(
        store.max("HW7"),
        Err(GradebookError::NotFound { .. })
    ));

    store
        .add_student(Student::new("dave", "Dave", "D", "Advisor3", 2024))
        .unwrap();
    assert_eq!(store.max("HW1").unwrap(), 0.0);
}

#[test]
fn malformed_batch_is_not_applied() {
    let mut store = loaded();
    let before = store.clone();

    let err = store
        .process_str("STUDENT\ndave\nDave\nD\nAdvisor3\n2024\nSTUDENT\nerin\nErin\nE\nAdvisor3\nsoon\n")
        .unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(store, before);
    assert!(store.student("dave").is_none());
}

#[test]
fn file_based_processing() {
    let dir = tempfile::tempdir().unwrap();
    let assignments = dir.path().join("addAssignments.txt");
    let grades = dir.path().join("gradesForAssignment1.txt");
    std::fs::write(&assignments, ASSIGNMENTS).unwrap();
    std::fs::write(&grades, "GRADES_FOR_ASSIGNMENT\nHW2\nbob\n88\n").unwrap();

    let mut store: GradeStore = STUDENTS.parse().unwrap();
    store.process_file(&assignments).unwrap();
    store.process_file(&grades).unwrap();
    assert_eq!(store.assignment_grade("HW2", "bob").unwrap(), 88.0);

    let saved = dir.path().join("gradebook.txt");
    store.save(&saved).unwrap();
    assert_eq!(GradeStore::from_file(&saved).unwrap(), store);
}
