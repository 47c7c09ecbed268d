//! Input parsing and schema definitions.
//!
//! This module handles:
//! - Parsing the per-question JSON dataset
//! - Reading delimited wide tables
//! - Reshaping wide tables into long records

pub mod schema;
pub mod table;

// Re-export main types
pub use schema::{Dataset, ModelResponses, Question};
pub use table::{parse_table, transform, LongRecord, Table};
