//! Gradebook error types.
//!
//! Lookups and statistics fail with these errors. Grade changes do not:
//! [`crate::GradeStore::change_grade`] reports a rejected change as `false`.

use thiserror::Error;

/// Errors that can occur when querying or loading a gradebook.
#[derive(Debug, Error)]
pub enum GradebookError {
    /// An assignment name or student username did not resolve.
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    /// A statistic was requested over an empty collection.
    #[error("empty collection: {0}")]
    EmptyCollection(String),

    /// Input text did not match any record format.
    #[error("invalid format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    /// An assignment or student with the same key already exists.
    #[error("duplicate {kind}: {name}")]
    Duplicate { kind: EntityKind, name: String },

    /// Reading or writing a gradebook file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Assignment,
    Student,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Assignment => write!(f, "assignment"),
            EntityKind::Student => write!(f, "student"),
        }
    }
}

impl GradebookError {
    pub(crate) fn assignment_not_found(name: &str) -> Self {
        GradebookError::NotFound {
            kind: EntityKind::Assignment,
            name: name.to_string(),
        }
    }

    pub(crate) fn student_not_found(username: &str) -> Self {
        GradebookError::NotFound {
            kind: EntityKind::Student,
            name: username.to_string(),
        }
    }

    pub(crate) fn invalid_format(line: usize, message: impl Into<String>) -> Self {
        GradebookError::InvalidFormat {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` if a name or username did not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GradebookError::NotFound { .. })
    }

    /// Returns `true` if the error came from malformed input text.
    pub fn is_format_error(&self) -> bool {
        matches!(self, GradebookError::InvalidFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;
