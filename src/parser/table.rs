//! Wide-format table parsing and reshaping into long records.
//!
//! A wide table has one key column followed by one column per series:
//!
//! ```text
//! Domain,Human,GPT-4o
//! Ethics,0.052,0.011
//! ```
//!
//! Each non-empty value cell becomes one [`LongRecord`].

use crate::utils::error::ParseError;
use log::debug;
use serde::Serialize;

/// One observation in long format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    pub row_key: String,
    pub column_key: String,
    pub value: f64,
}

/// Reshape a wide table into long records
///
/// **Public** - main entry point for reshaping
///
/// # Arguments
/// * `header` - Header cells; the first one names the key column
/// * `rows` - Data rows; the first cell of each is the row key
///
/// # Returns
/// Records in row-major order. Empty or whitespace-only cells produce no
/// record. Values that parse to NaN or infinity are skipped as missing.
///
/// # Errors
/// * `ParseError::MissingHeader` - header is empty
/// * `ParseError::InvalidNumber` - a non-empty cell is not a number; the
///   whole table is rejected
/// * `ParseError::RaggedRow` - a row has more cells than the header
pub fn transform<S: AsRef<str>>(
    header: &[S],
    rows: &[Vec<S>],
) -> Result<Vec<LongRecord>, ParseError> {
    let (_, columns) = header.split_first().ok_or(ParseError::MissingHeader)?;

    let mut records = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let Some((row_key, cells)) = row.split_first() else {
            continue;
        };
        let row_key = row_key.as_ref();
        let row_number = index + 1;

        if cells.len() > columns.len() {
            return Err(ParseError::RaggedRow {
                row: row_number,
                row_key: row_key.to_string(),
                cells: row.len(),
                columns: header.len(),
            });
        }

        for (cell, column) in cells.iter().zip(columns) {
            let cell = cell.as_ref().trim();
            if cell.is_empty() {
                continue;
            }

            let value: f64 = cell.parse().map_err(|_| ParseError::InvalidNumber {
                row: row_number,
                row_key: row_key.to_string(),
                column: column.as_ref().to_string(),
                value: cell.to_string(),
            })?;

            if !value.is_finite() {
                debug!("Skipping non-finite cell {} / {}", row_key, column.as_ref());
                continue;
            }

            records.push(LongRecord {
                row_key: row_key.to_string(),
                column_key: column.as_ref().to_string(),
                value,
            });
        }
    }

    debug!(
        "Reshaped {} rows x {} columns into {} records",
        rows.len(),
        columns.len(),
        records.len()
    );

    Ok(records)
}

/// A delimited table held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Name of the key column (e.g. "Domain")
    pub fn row_key_name(&self) -> &str {
        self.header.first().map(String::as_str).unwrap_or_default()
    }

    /// Series column names
    pub fn columns(&self) -> &[String] {
        self.header.get(1..).unwrap_or_default()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Reshape into long records
    pub fn to_long(&self) -> Result<Vec<LongRecord>, ParseError> {
        transform(&self.header, &self.rows)
    }
}

/// Read delimited text into a [`Table`]
///
/// **Public** - used for the CSV data sources
///
/// Surrounding whitespace of the whole document is ignored, header names
/// are trimmed, and rows may be shorter than the header.
pub fn parse_table(text: &str, delimiter: u8) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.trim().as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.iter().all(|cell| cell.is_empty()) {
        return Err(ParseError::MissingHeader);
    }

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    debug!("Parsed table with {} columns and {} rows", header.len(), rows.len());

    Ok(Table::new(header, rows))
}
