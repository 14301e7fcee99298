//! Pipeline processing stages: text cleaning, filename metadata,
//! consolidation and statistics.

pub mod filename;
pub mod loader;
pub mod normalize;
pub mod stats;

pub use filename::{
    assign_slot_with_timezone, extract_date_and_slot, extract_metadata, infer_track_from_filename,
};
pub use loader::{load_all, LoadError, DATE_COLUMN, SLOT_COLUMN, TRACK_COLUMN};
pub use normalize::{normalize_track, parse_fr_timestamp, strip_accents};
pub use stats::{circular_mean_deg, summary_stats, ColumnStats, SummaryStats};
