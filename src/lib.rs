//! Sensor session ingestion and statistics pipeline.
//!
//! This crate provides tools for:
//! - Loading heterogeneous session export files (multi-delimiter CSV and
//!   spreadsheet tables)
//! - Inferring capture date, time-of-day slot and measurement track from
//!   filename conventions
//! - Consolidating all sessions into one in-memory dataset
//! - Descriptive statistics, including circular means for wind direction
//!
//! # Example
//!
//! ```no_run
//! use picopatt_pipeline::config::PipelineConfig;
//! use picopatt_pipeline::processors::{load_all, summary_stats};
//!
//! let config = PipelineConfig::default();
//! let dataset = load_all("data".as_ref(), &config).unwrap();
//! let stats = summary_stats(&dataset, &["temperature".to_string()]);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{PipelineConfig, ReaderConfig, SlotConfig, TrackConfig};
pub use core::{DataTable, FileMetadata, Slot, Track};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
