//! CSV export of a consolidated table.
//!
//! The pipeline itself never writes files; this thin surface exists for the
//! CLI so a consolidated dataset can be handed to external tooling.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::core::table::DataTable;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Write a table to CSV with a header row.
///
/// Missing cells serialize as empty fields.
pub fn write_table_csv(path: &Path, table: &DataTable) -> Result<()> {
    ensure_parent_dirs(path)?;

    let path_str = path.display().to_string();
    let csv_err = |e: csv::Error| WriteError::Csv {
        path: path_str.clone(),
        source: e,
    };

    let mut writer = csv::Writer::from_path(path).map_err(|e| WriteError::Csv {
        path: path_str.clone(),
        source: e,
    })?;

    writer.write_record(table.columns()).map_err(csv_err)?;

    for row in table.rows() {
        writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|e| WriteError::Csv {
        path: path_str.clone(),
        source: csv::Error::from(e),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_table_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = DataTable::new(vec!["a".into(), "b".into()]);
        table.push_row(vec![Some("1".into()), None]);
        table.push_row(vec![Some("2".into()), Some("x".into())]);

        write_table_csv(&path, &table).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a,b\n1,\n2,x\n");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.csv");

        let mut table = DataTable::new(vec!["a".into()]);
        table.push_row(vec![Some("1".into())]);

        write_table_csv(&path, &table).unwrap();
        assert!(path.exists());
    }
}
