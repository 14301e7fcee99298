//! Tabular readers for session export files.
//!
//! Session exports arrive as delimited text with no consistent delimiter,
//! or as spreadsheets. The reader tries delimiters in configured order and
//! accepts the first parse that yields enough columns; spreadsheets are
//! loaded through calamine. Every loaded table gets a provenance column
//! recording the source filename.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use crate::config::ReaderConfig;
use crate::core::table::DataTable;

/// Name of the provenance column added to every loaded table.
pub const SOURCE_FILE_COLUMN: &str = "__source_file";

/// Errors that can occur during file reading.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet has no usable sheet: {0}")]
    EmptySheet(PathBuf),

    #[error("Unable to read file with any configured delimiter: {0}")]
    Unreadable(PathBuf),
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, ReadError>;

/// Load a single session file into a [`DataTable`].
///
/// Spreadsheet extensions are loaded directly; anything else goes through
/// delimited-text parsing, trying each configured delimiter in order and
/// accepting the first attempt that parses and yields at least
/// `config.min_columns` columns. When no delimiter produces a usable table
/// the whole file is rejected with [`ReadError::Unreadable`] naming the
/// path; the caller decides whether that aborts the run.
///
/// On success a provenance column holding the source filename is appended
/// to every row.
pub fn read_table(path: &Path, config: &ReaderConfig) -> Result<DataTable> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut table = if config.spreadsheet_extensions.iter().any(|s| *s == ext) {
        read_spreadsheet(path)?
    } else {
        read_delimited_any(path, config)?
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    table.push_const_column(SOURCE_FILE_COLUMN, Some(file_name));

    Ok(table)
}

/// Try each configured delimiter in order, returning the first table with
/// enough columns.
fn read_delimited_any(path: &Path, config: &ReaderConfig) -> Result<DataTable> {
    for &delimiter in &config.delimiters {
        if !delimiter.is_ascii() {
            continue;
        }
        match read_delimited(path, delimiter as u8) {
            Ok(table) if table.num_columns() >= config.min_columns => return Ok(table),
            // Too few columns or a parse failure: try the next delimiter.
            _ => continue,
        }
    }
    Err(ReadError::Unreadable(path.to_path_buf()))
}

/// Parse one file with one fixed delimiter. Header row supplies the column
/// names; empty cells become missing values.
fn read_delimited(path: &Path, delimiter: u8) -> Result<DataTable> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut table = DataTable::new(columns);

    for result in reader.records() {
        let record = result?;
        table.push_row(
            record
                .iter()
                .map(|cell| {
                    if cell.trim().is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(table)
}

/// Load the first worksheet of a spreadsheet file. The first row supplies
/// the column names.
fn read_spreadsheet(path: &Path) -> Result<DataTable> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReadError::EmptySheet(path.to_path_buf()))??;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ReadError::EmptySheet(path.to_path_buf()))?;

    let columns: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();
    let mut table = DataTable::new(columns);

    for row in rows {
        table.push_row(
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => None,
                    other => Some(other.to_string()),
                })
                .collect(),
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_comma_delimited() {
        let file = temp_csv("a,b,c,d,e\n1,2,3,4,5\n6,7,8,9,10\n");

        let table = read_table(file.path(), &ReaderConfig::default()).unwrap();

        // Five data columns plus provenance.
        assert_eq!(table.num_columns(), 6);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("a").unwrap(), vec![Some("1"), Some("6")]);
    }

    #[test]
    fn test_provenance_column_holds_file_name() {
        let file = temp_csv("a,b,c,d,e\n1,2,3,4,5\n");

        let table = read_table(file.path(), &ReaderConfig::default()).unwrap();

        let expected = file
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        let provenance = table.column(SOURCE_FILE_COLUMN).unwrap();
        assert_eq!(provenance, vec![Some(expected.as_str())]);
    }

    #[test]
    fn test_semicolon_selected_over_single_column_comma_parse() {
        // Comma parsing "succeeds" with one column; the semicolon attempt
        // must win because it reaches the minimum column count.
        let file = temp_csv("a;b;c;d;e\n1;2;3;4;5\n");

        let table = read_table(file.path(), &ReaderConfig::default()).unwrap();

        assert_eq!(table.num_columns(), 6);
        assert_eq!(table.column("c").unwrap(), vec![Some("3")]);
    }

    #[test]
    fn test_tab_delimited() {
        let file = temp_csv("a\tb\tc\td\te\n1\t2\t3\t4\t5\n");

        let table = read_table(file.path(), &ReaderConfig::default()).unwrap();

        assert_eq!(table.num_columns(), 6);
        assert_eq!(table.column("e").unwrap(), vec![Some("5")]);
    }

    #[test]
    fn test_unreadable_file_names_path() {
        // Two columns under every delimiter: below the minimum everywhere.
        let file = temp_csv("a,b\n1,2\n");

        let err = read_table(file.path(), &ReaderConfig::default()).unwrap_err();

        match err {
            ReadError::Unreadable(path) => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let file = temp_csv("a,b,c,d,e\n1,,3, ,5\n");

        let table = read_table(file.path(), &ReaderConfig::default()).unwrap();

        assert_eq!(table.column("b").unwrap(), vec![None]);
        assert_eq!(table.column("d").unwrap(), vec![None]);
        assert_eq!(table.column("e").unwrap(), vec![Some("5")]);
    }
}
