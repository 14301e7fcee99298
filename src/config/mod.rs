//! Configuration types for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::metadata::{Slot, Track};

/// One keyword-to-track classification rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRule {
    /// Substring searched for in the cleaned text.
    pub keyword: String,
    /// Track assigned when the keyword is found.
    pub track: Track,
}

impl TrackRule {
    fn new(keyword: &str, track: Track) -> Self {
        Self {
            keyword: keyword.to_string(),
            track,
        }
    }
}

/// Configuration for track classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Rules applied to free-text track labels, in priority order.
    #[serde(default = "default_label_rules")]
    pub label_rules: Vec<TrackRule>,

    /// Rules applied to filenames, in priority order.
    ///
    /// Filenames match on the singular "boulevard" while labels go through
    /// the rewrite step first; the two rule sets stay separate for that
    /// reason.
    #[serde(default = "default_filename_rules")]
    pub filename_rules: Vec<TrackRule>,

    /// Spelling rewrites applied to labels before classification.
    #[serde(default = "default_rewrites")]
    pub rewrites: Vec<(String, String)>,
}

fn default_label_rules() -> Vec<TrackRule> {
    vec![
        TrackRule::new("antigone", Track::Antigone),
        TrackRule::new("boulevards", Track::Boulevards),
        TrackRule::new("ecusson", Track::Ecusson),
    ]
}

fn default_filename_rules() -> Vec<TrackRule> {
    vec![
        TrackRule::new("antigone", Track::Antigone),
        TrackRule::new("boulevard", Track::Boulevards),
        TrackRule::new("ecusson", Track::Ecusson),
    ]
}

fn default_rewrites() -> Vec<(String, String)> {
    vec![("boulevard".to_string(), "boulevards".to_string())]
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            label_rules: default_label_rules(),
            filename_rules: default_filename_rules(),
            rewrites: default_rewrites(),
        }
    }
}

/// Configuration for time-slot assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Ascending hour boundaries delimiting slots M1..M4 as half-open
    /// ranges: [bounds[0], bounds[1]) is M1 and so on.
    #[serde(default = "default_hour_bounds")]
    pub hour_bounds: [u32; 5],

    /// IANA timezone name used by the localized slot-assignment path.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_hour_bounds() -> [u32; 5] {
    [8, 11, 14, 17, 20]
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

impl SlotConfig {
    /// Maps an hour of day to its slot by the configured half-open ranges.
    pub fn slot_for_hour(&self, hour: u32) -> Slot {
        const SLOTS: [Slot; 4] = [Slot::M1, Slot::M2, Slot::M3, Slot::M4];
        for (i, window) in self.hour_bounds.windows(2).enumerate() {
            if hour >= window[0] && hour < window[1] {
                return SLOTS[i];
            }
        }
        Slot::Unknown
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            hour_bounds: default_hour_bounds(),
            timezone: default_timezone(),
        }
    }
}

/// Configuration for the tabular reader and file discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Delimiters tried in order for delimited-text files.
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<char>,

    /// Minimum column count for a delimited parse to be accepted.
    ///
    /// Guards against a mis-split single-column result when the wrong
    /// delimiter "succeeds".
    #[serde(default = "default_min_columns")]
    pub min_columns: usize,

    /// File extensions eligible for discovery (lowercase, without dot).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Extensions loaded through the spreadsheet reader instead of the
    /// delimited-text reader.
    #[serde(default = "default_spreadsheet_extensions")]
    pub spreadsheet_extensions: Vec<String>,
}

fn default_delimiters() -> Vec<char> {
    vec![',', ';', '\t']
}

fn default_min_columns() -> usize {
    5
}

fn default_extensions() -> Vec<String> {
    vec!["csv".to_string(), "xlsx".to_string(), "xls".to_string()]
}

fn default_spreadsheet_extensions() -> Vec<String> {
    vec!["xlsx".to_string(), "xls".to_string()]
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiters: default_delimiters(),
            min_columns: default_min_columns(),
            extensions: default_extensions(),
            spreadsheet_extensions: default_spreadsheet_extensions(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub tracks: TrackConfig,

    #[serde(default)]
    pub slots: SlotConfig,

    #[serde(default)]
    pub reader: ReaderConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_track_config() {
        let config = TrackConfig::default();
        assert_eq!(config.label_rules.len(), 3);
        assert_eq!(config.label_rules[0].keyword, "antigone");
        assert_eq!(config.filename_rules[1].keyword, "boulevard");
    }

    #[test]
    fn test_default_slot_config() {
        let config = SlotConfig::default();
        assert_eq!(config.hour_bounds, [8, 11, 14, 17, 20]);
        assert_eq!(config.timezone, "Europe/Paris");
    }

    #[test]
    fn test_slot_for_hour_ranges() {
        let config = SlotConfig::default();
        assert_eq!(config.slot_for_hour(7), Slot::Unknown);
        assert_eq!(config.slot_for_hour(8), Slot::M1);
        assert_eq!(config.slot_for_hour(10), Slot::M1);
        assert_eq!(config.slot_for_hour(11), Slot::M2);
        assert_eq!(config.slot_for_hour(14), Slot::M3);
        assert_eq!(config.slot_for_hour(17), Slot::M4);
        assert_eq!(config.slot_for_hour(19), Slot::M4);
        assert_eq!(config.slot_for_hour(20), Slot::Unknown);
    }

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.reader.min_columns, 5);
        assert_eq!(config.reader.delimiters, vec![',', ';', '\t']);
        assert_eq!(config.reader.extensions.len(), 3);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = PipelineConfig::default();
        config.to_yaml(&path).unwrap();

        let loaded = PipelineConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded.slots.hour_bounds, config.slots.hour_bounds);
        assert_eq!(loaded.reader.min_columns, config.reader.min_columns);
    }
}
