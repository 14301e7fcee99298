//! Session metadata types derived from filenames.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-of-day bucket for a measurement session.
///
/// Each slot covers a three-hour window: M1 = 08-11, M2 = 11-14,
/// M3 = 14-17, M4 = 17-20. Hours outside those windows map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    M1,
    M2,
    M3,
    M4,
    Unknown,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Slot::M1 => "M1",
            Slot::M2 => "M2",
            Slot::M3 => "M3",
            Slot::M4 => "M4",
            Slot::Unknown => "UNK",
        };
        f.write_str(s)
    }
}

/// Measurement route within the campaign area.
///
/// Absence of a classification is modeled as `Option<Track>` so that
/// "no keyword matched" stays distinct from any real route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Antigone,
    Boulevards,
    Ecusson,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Track::Antigone => "antigone",
            Track::Boulevards => "boulevards",
            Track::Ecusson => "ecusson",
        };
        f.write_str(s)
    }
}

/// Metadata inferred from a single session filename.
///
/// `date` and `slot` come jointly from one embedded `YYYYMMDD_HHMM` token;
/// `track` is inferred independently by keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Capture date, absent when no timestamp token was found or the
    /// digits do not form a valid calendar date.
    pub date: Option<NaiveDate>,
    /// Time-of-day slot from the raw hour digits.
    pub slot: Slot,
    /// Measurement route, absent when no keyword matched.
    pub track: Option<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_display() {
        assert_eq!(Slot::M1.to_string(), "M1");
        assert_eq!(Slot::M4.to_string(), "M4");
        assert_eq!(Slot::Unknown.to_string(), "UNK");
    }

    #[test]
    fn test_track_display() {
        assert_eq!(Track::Antigone.to_string(), "antigone");
        assert_eq!(Track::Boulevards.to_string(), "boulevards");
        assert_eq!(Track::Ecusson.to_string(), "ecusson");
    }
}
