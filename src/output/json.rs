//! JSON chart specification writer.
//!
//! Writes chart descriptions to `.vl.json` files with pretty formatting.

use crate::chart::ChartDescription;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a chart description to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_chart(chart: &ChartDescription, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} spec to: {}", chart.kind(), output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, chart).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Spec written successfully ({} bytes)",
        std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Read a chart specification back as raw JSON
///
/// **Public** - useful for validation and testing
pub fn read_chart(input_path: impl AsRef<Path>) -> Result<serde_json::Value, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading spec from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let spec = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(spec)
}

/// Validate that output path is writable
///
/// **Public** - shared by every writer in this module
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of `path`
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_heatmap, ChartConfig};
    use crate::parser::LongRecord;
    use tempfile::NamedTempFile;

    fn sample_chart() -> ChartDescription {
        let records = vec![LongRecord {
            row_key: "Ethics".to_string(),
            column_key: "Human".to_string(),
            value: 0.05,
        }];
        build_heatmap(&records, &ChartConfig::default())
    }

    #[test]
    fn test_write_and_read_chart() {
        let chart = sample_chart();
        let temp_file = NamedTempFile::new().unwrap();

        write_chart(&chart, temp_file.path()).unwrap();
        let loaded = read_chart(temp_file.path()).unwrap();

        assert_eq!(&loaded, chart.spec());
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/chart.vl.json");

        write_chart(&sample_chart(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
