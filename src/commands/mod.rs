//! CLI command implementations.
//!
//! `build` renders the whole page, `questions` and `question` inspect the
//! questions dataset. Argument and report models live in [`models`].

pub mod build;
pub mod models;
pub mod questions;
pub mod utils;

// Re-export main command functions
pub use build::{execute_build, validate_args, validate_sources};
pub use models::{BuildArgs, BuildReport, SourceArgs, StyleArgs};
pub use questions::{emit_chart, list_questions, render_question};
pub use utils::{display_questions, display_report, display_version};
