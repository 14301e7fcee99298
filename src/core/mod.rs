//! Core data structures and file I/O.

pub mod metadata;
pub mod readers;
pub mod table;
pub mod writers;

pub use metadata::{FileMetadata, Slot, Track};
pub use readers::{read_table, ReadError, SOURCE_FILE_COLUMN};
pub use table::DataTable;
pub use writers::{write_table_csv, WriteError};
