//! Dataset consolidation.
//!
//! Discovers every eligible session file under a directory tree, loads each
//! one, attaches filename-derived metadata as constant columns, and
//! concatenates everything into one consolidated table. Files are processed
//! in sorted-path order; the resulting row order is part of the contract.

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::PipelineConfig;
use crate::core::readers::{read_table, ReadError};
use crate::core::table::DataTable;
use crate::processors::filename::{extract_date_and_slot, infer_track_from_filename};

/// Column holding the capture date inferred from the filename.
pub const DATE_COLUMN: &str = "date";
/// Column holding the time-of-day slot inferred from the filename.
pub const SLOT_COLUMN: &str = "M_slot";
/// Column holding the track inferred from the filename.
pub const TRACK_COLUMN: &str = "track_id";

/// Errors that can occur during dataset consolidation.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No eligible file was found under the input directory. Fatal
    /// precondition, raised before any file is read.
    #[error("No input files found in: {0}")]
    NoInputFiles(PathBuf),

    /// A discovered file could not be read. Aborts the whole load; the
    /// pipeline does not skip-and-continue over unreadable files.
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Recursively enumerate eligible files under a directory, sorted by path.
fn discover_files(data_dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(data_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    extensions.iter().any(|e| *e == ext)
                })
                .unwrap_or(false)
        })
        .collect();

    paths.sort();
    paths
}

/// Load every session file under `data_dir` into one consolidated table.
///
/// For each file in sorted-path order: read its table, derive date and
/// slot from the filename (raw hour digits, no timezone conversion),
/// infer the track, and attach all three as constant columns. The
/// per-file tables are then concatenated with column-union semantics.
///
/// # Errors
///
/// [`LoadError::NoInputFiles`] when the directory holds no eligible file;
/// [`LoadError::Read`] when any file is unreadable.
pub fn load_all(data_dir: &Path, config: &PipelineConfig) -> Result<DataTable> {
    let paths = discover_files(data_dir, &config.reader.extensions);
    if paths.is_empty() {
        return Err(LoadError::NoInputFiles(data_dir.to_path_buf()));
    }

    let mut tables = Vec::with_capacity(paths.len());

    for path in &paths {
        let mut table = read_table(path, &config.reader)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (date, slot) = extract_date_and_slot(&name, &config.slots);
        let track = infer_track_from_filename(&name, &config.tracks);

        table.push_const_column(DATE_COLUMN, date.map(|d| d.to_string()));
        table.push_const_column(SLOT_COLUMN, Some(slot.to_string()));
        table.push_const_column(TRACK_COLUMN, track.map(|t| t.to_string()));

        info!(
            "{:<50} ->  {}  {}",
            name,
            date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            slot
        );

        tables.push(table);
    }

    Ok(DataTable::concat(&tables))
}
