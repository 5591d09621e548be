//! gradebook-core — Gradebook store, statistics, and text record codec.
//!
//! This crate defines the assignment and student model, the [`GradeStore`]
//! aggregate that keeps the grade matrix consistent, and the line-oriented
//! text format used to load and persist gradebooks.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod store;

pub use error::{GradebookError, Result};
pub use model::{Assignment, Student};
pub use parser::ApplySummary;
pub use store::GradeStore;
