//! Line-oriented gradebook record parser.
//!
//! Input starts with a tag line naming one of the [`RecordKind`]s. The body
//! is parsed into a list of [`Mutation`]s before anything touches a store,
//! so malformed input never leaves a gradebook half-updated.

use std::fmt;
use std::str::FromStr;

use crate::error::{GradebookError, Result};
use crate::model::{Assignment, Student};
use crate::store::GradeStore;

/// The five record formats, selected by the first line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A full snapshot: assignment header rows followed by student rows.
    Gradebook,
    /// Three-line assignment records.
    Assignment,
    /// Five-line student records.
    Student,
    /// Username and grade pairs for one assignment.
    GradesForAssignment,
    /// Assignment name and grade pairs for one student.
    GradesForStudent,
}

impl RecordKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Gradebook => "GRADEBOOK",
            RecordKind::Assignment => "ASSIGNMENT",
            RecordKind::Student => "STUDENT",
            RecordKind::GradesForAssignment => "GRADES_FOR_ASSIGNMENT",
            RecordKind::GradesForStudent => "GRADES_FOR_STUDENT",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "GRADEBOOK" => Ok(RecordKind::Gradebook),
            "ASSIGNMENT" => Ok(RecordKind::Assignment),
            "STUDENT" => Ok(RecordKind::Student),
            "GRADES_FOR_ASSIGNMENT" => Ok(RecordKind::GradesForAssignment),
            "GRADES_FOR_STUDENT" => Ok(RecordKind::GradesForStudent),
            other => Err(format!("unknown record tag: {other:?}")),
        }
    }
}

/// A single change to apply to a [`GradeStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddAssignment(Assignment),
    AddStudent(Student),
    ChangeGrade {
        assignment: String,
        username: String,
        grade: f64,
    },
}

/// What applying a batch of records did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub assignments_added: usize,
    pub students_added: usize,
    pub grades_changed: usize,
    /// Grade changes refused for an unknown name or an out-of-range value.
    pub grades_rejected: usize,
}

/// Trimmed input lines with their 1-based line numbers.
struct Cursor<'a> {
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input
                .lines()
                .enumerate()
                .map(|(i, line)| (i + 1, line.trim()))
                .collect(),
            pos: 0,
        }
    }

    fn skip_blank(&mut self) {
        while self.pos < self.lines.len() && self.lines[self.pos].1.is_empty() {
            self.pos += 1;
        }
    }

    fn is_done(&mut self) -> bool {
        self.skip_blank();
        self.pos >= self.lines.len()
    }

    /// The next line as-is, blank or not.
    fn next_raw(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied();
        self.pos += 1;
        line.ok_or_else(|| self.end_of_input(what))
    }

    /// The next non-blank line. Only used at record boundaries; fields
    /// inside a record are positional and may be empty.
    fn expect(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.skip_blank();
        self.next_raw(what)
    }

    /// Consume a repeated record tag if one comes next.
    fn eat_tag(&mut self, kind: RecordKind) {
        self.skip_blank();
        if self.lines.get(self.pos).is_some_and(|(_, l)| *l == kind.tag()) {
            self.pos += 1;
        }
    }

    fn end_of_input(&self, what: &str) -> GradebookError {
        GradebookError::invalid_format(
            self.lines.len(),
            format!("unexpected end of input, expected {what}"),
        )
    }
}

/// Parse record text into the mutations it describes.
pub fn parse(input: &str) -> Result<Vec<Mutation>> {
    let mut cursor = Cursor::new(input);
    let (line, tag) = cursor.expect("a record tag")?;
    let kind: RecordKind = tag
        .parse()
        .map_err(|e: String| GradebookError::invalid_format(line, e))?;

    match kind {
        RecordKind::Gradebook => parse_gradebook(&mut cursor),
        RecordKind::Assignment => parse_assignments(&mut cursor),
        RecordKind::Student => parse_students(&mut cursor),
        RecordKind::GradesForAssignment => parse_grades_for_assignment(&mut cursor),
        RecordKind::GradesForStudent => parse_grades_for_student(&mut cursor),
    }
}

/// Apply parsed mutations in order.
///
/// Duplicate assignments or students abort with an error. Refused grade
/// changes are logged and counted.
pub fn apply(store: &mut GradeStore, mutations: Vec<Mutation>) -> Result<ApplySummary> {
    let mut summary = ApplySummary::default();

    for mutation in mutations {
        match mutation {
            Mutation::AddAssignment(assignment) => {
                store.add_assignment(assignment)?;
                summary.assignments_added += 1;
            }
            Mutation::AddStudent(student) => {
                store.add_student(student)?;
                summary.students_added += 1;
            }
            Mutation::ChangeGrade {
                assignment,
                username,
                grade,
            } => {
                if store.change_grade(&assignment, &username, grade) {
                    summary.grades_changed += 1;
                } else {
                    tracing::warn!("rejected grade {grade} for {username} on {assignment}");
                    summary.grades_rejected += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn split_row(row: &str) -> Vec<&str> {
    if row.is_empty() {
        return Vec::new();
    }
    row.split('\t').map(str::trim).collect()
}

fn parse_gradebook(cursor: &mut Cursor<'_>) -> Result<Vec<Mutation>> {
    // The three header rows are positional: they are blank when there are
    // no assignments.
    let (_, names) = cursor.next_raw("assignment names")?;
    let (totals_line, totals) = cursor.next_raw("assignment total points")?;
    let (percents_line, percents) = cursor.next_raw("assignment percents")?;

    let names = split_row(names);
    let totals = split_row(totals);
    let percents = split_row(percents);
    if totals.len() != names.len() {
        return Err(GradebookError::invalid_format(
            totals_line,
            format!("expected {} totals, found {}", names.len(), totals.len()),
        ));
    }
    if percents.len() != names.len() {
        return Err(GradebookError::invalid_format(
            percents_line,
            format!("expected {} percents, found {}", names.len(), percents.len()),
        ));
    }

    let mut mutations = Vec::new();
    for ((name, total), percent) in names.iter().zip(&totals).zip(&percents) {
        mutations.push(Mutation::AddAssignment(Assignment::new(
            *name,
            parse_total_points(totals_line, total)?,
            parse_percent(percents_line, percent)?,
        )));
    }

    while !cursor.is_done() {
        let (line, row) = cursor.next_raw("a student row")?;
        let fields = split_row(row);
        if fields.len() < 5 {
            return Err(GradebookError::invalid_format(
                line,
                format!("student row needs 5 identity fields, found {}", fields.len()),
            ));
        }
        let grades = &fields[5..];
        if grades.len() > names.len() {
            return Err(GradebookError::invalid_format(
                line,
                format!(
                    "student row has {} grades for {} assignments",
                    grades.len(),
                    names.len()
                ),
            ));
        }

        let username = fields[0];
        mutations.push(Mutation::AddStudent(Student::new(
            username,
            fields[1],
            fields[2],
            fields[3],
            parse_year(line, fields[4])?,
        )));
        for (name, grade) in names.iter().zip(grades) {
            mutations.push(Mutation::ChangeGrade {
                assignment: name.to_string(),
                username: username.to_string(),
                grade: parse_number(line, grade, "grade")?,
            });
        }
    }

    Ok(mutations)
}

fn parse_assignments(cursor: &mut Cursor<'_>) -> Result<Vec<Mutation>> {
    let mut mutations = Vec::new();
    loop {
        let (_, name) = cursor.expect("assignment name")?;
        let (total_line, total) = cursor.next_raw("total points")?;
        let (percent_line, percent) = cursor.next_raw("percent of grade")?;
        mutations.push(Mutation::AddAssignment(Assignment::new(
            name,
            parse_total_points(total_line, total)?,
            parse_percent(percent_line, percent)?,
        )));

        cursor.eat_tag(RecordKind::Assignment);
        if cursor.is_done() {
            return Ok(mutations);
        }
    }
}

fn parse_students(cursor: &mut Cursor<'_>) -> Result<Vec<Mutation>> {
    let mut mutations = Vec::new();
    loop {
        let (_, username) = cursor.expect("username")?;
        let (_, first) = cursor.next_raw("first name")?;
        let (_, last) = cursor.next_raw("last name")?;
        let (_, advisor) = cursor.next_raw("advisor")?;
        let (year_line, year) = cursor.next_raw("graduation year")?;
        mutations.push(Mutation::AddStudent(Student::new(
            username,
            first,
            last,
            advisor,
            parse_year(year_line, year)?,
        )));

        cursor.eat_tag(RecordKind::Student);
        if cursor.is_done() {
            return Ok(mutations);
        }
    }
}

fn parse_grades_for_assignment(cursor: &mut Cursor<'_>) -> Result<Vec<Mutation>> {
    let (_, assignment) = cursor.expect("assignment name")?;
    let mut mutations = Vec::new();
    while !cursor.is_done() {
        let (_, username) = cursor.expect("username")?;
        let (line, grade) = cursor.expect("grade")?;
        mutations.push(Mutation::ChangeGrade {
            assignment: assignment.to_string(),
            username: username.to_string(),
            grade: parse_number(line, grade, "grade")?,
        });
    }
    Ok(mutations)
}

fn parse_grades_for_student(cursor: &mut Cursor<'_>) -> Result<Vec<Mutation>> {
    let (_, username) = cursor.expect("username")?;
    let mut mutations = Vec::new();
    while !cursor.is_done() {
        let (_, assignment) = cursor.expect("assignment name")?;
        let (line, grade) = cursor.expect("grade")?;
        mutations.push(Mutation::ChangeGrade {
            assignment: assignment.to_string(),
            username: username.to_string(),
            grade: parse_number(line, grade, "grade")?,
        });
    }
    Ok(mutations)
}

fn parse_number(line: usize, field: &str, what: &str) -> Result<f64> {
    let value: f64 = field.trim().parse().map_err(|_| {
        GradebookError::invalid_format(line, format!("{what} is not a number: {field:?}"))
    })?;
    if !value.is_finite() {
        return Err(GradebookError::invalid_format(
            line,
            format!("{what} must be finite: {field:?}"),
        ));
    }
    Ok(value)
}

fn parse_total_points(line: usize, field: &str) -> Result<f64> {
    let value = parse_number(line, field, "total points")?;
    if value <= 0.0 {
        return Err(GradebookError::invalid_format(
            line,
            format!("total points must be positive: {field:?}"),
        ));
    }
    Ok(value)
}

fn parse_percent(line: usize, field: &str) -> Result<f64> {
    let value = parse_number(line, field, "percent of grade")?;
    if value < 0.0 {
        return Err(GradebookError::invalid_format(
            line,
            format!("percent of grade must not be negative: {field:?}"),
        ));
    }
    Ok(value)
}

fn parse_year(line: usize, field: &str) -> Result<i32> {
    field.trim().parse::<i32>().map_err(|_| {
        GradebookError::invalid_format(
            line,
            format!("graduation year is not an integer: {field:?}"),
        )
    })
}
