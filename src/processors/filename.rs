//! Metadata extraction from session filenames.
//!
//! Campaign exports follow the convention
//! `picopatt_montpellier_<track>_YYYYMMDD_HHMM.csv`. The capture date and
//! time slot are derived jointly from the embedded timestamp token; the
//! track is derived independently by keyword matching. Filenames that do
//! not follow the convention degrade to absent metadata instead of failing
//! the run.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use log::warn;
use regex::Regex;

use crate::config::{SlotConfig, TrackConfig};
use crate::core::metadata::{FileMetadata, Slot, Track};
use crate::processors::normalize::{classify, strip_accents};

/// Pattern for the `YYYYMMDD_HHMM` token embedded anywhere in a filename.
const TIMESTAMP_TOKEN: &str = r"(\d{8})_(\d{4})";

/// Infer the track from a filename.
///
/// Matches the accent-stripped, lowercased filename against raw keyword
/// substrings in priority order. Unlike label normalization this matches
/// the singular "boulevard", so no rewrite step is needed.
pub fn infer_track_from_filename(name: &str, config: &TrackConfig) -> Option<Track> {
    let cleaned = strip_accents(&name.to_lowercase());
    classify(&cleaned, &config.filename_rules)
}

/// Extract capture date and time slot from a filename.
///
/// Searches for the `YYYYMMDD_HHMM` token; without one the result is
/// `(None, Slot::Unknown)`. The slot comes from the raw hour digits with
/// no timezone conversion — this is the authoritative path for per-file
/// tagging during load. Digits that do not form a valid calendar date
/// degrade the date to `None` while the slot is still assigned.
pub fn extract_date_and_slot(name: &str, config: &SlotConfig) -> (Option<NaiveDate>, Slot) {
    let pattern = Regex::new(TIMESTAMP_TOKEN).unwrap();
    let Some(caps) = pattern.captures(name) else {
        return (None, Slot::Unknown);
    };

    let date = NaiveDate::parse_from_str(&caps[1], "%Y%m%d").ok();
    let slot = caps[2][..2]
        .parse::<u32>()
        .map(|hour| config.slot_for_hour(hour))
        .unwrap_or(Slot::Unknown);

    (date, slot)
}

/// Assign a time slot from a filename through timezone localization.
///
/// Second computation path next to [`extract_date_and_slot`]: the parsed
/// timestamp is localized to the configured timezone (Europe/Paris by
/// default) before the hour is mapped through the identical slot ranges.
/// Wall times that do not exist in the timezone (spring-forward gap) and
/// filenames without a timestamp token yield `Slot::Unknown`.
pub fn assign_slot_with_timezone(file_name: &str, config: &SlotConfig) -> Slot {
    let pattern = Regex::new(TIMESTAMP_TOKEN).unwrap();
    let Some(caps) = pattern.captures(file_name) else {
        return Slot::Unknown;
    };

    let raw = format!("{} {}", &caps[1], &caps[2]);
    let Ok(naive) = NaiveDateTime::parse_from_str(&raw, "%Y%m%d %H%M") else {
        return Slot::Unknown;
    };

    let tz: Tz = match config.timezone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            warn!("unknown timezone '{}', slot left unknown", config.timezone);
            return Slot::Unknown;
        }
    };

    match tz.from_local_datetime(&naive).earliest() {
        Some(localized) => config.slot_for_hour(localized.hour()),
        None => Slot::Unknown,
    }
}

/// Derive all filename metadata for one file in a single call.
pub fn extract_metadata(name: &str, tracks: &TrackConfig, slots: &SlotConfig) -> FileMetadata {
    let (date, slot) = extract_date_and_slot(name, slots);
    FileMetadata {
        date,
        slot,
        track: infer_track_from_filename(name, tracks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_track_from_filename() {
        let config = TrackConfig::default();
        assert_eq!(
            infer_track_from_filename("picopatt_montpellier_antigone_20241107_1122.csv", &config),
            Some(Track::Antigone)
        );
        assert_eq!(
            infer_track_from_filename("picopatt_BOULEVARD_20241107_0830.csv", &config),
            Some(Track::Boulevards)
        );
        assert_eq!(
            infer_track_from_filename("picopatt_écusson_20241107_1500.csv", &config),
            Some(Track::Ecusson)
        );
        assert_eq!(
            infer_track_from_filename("picopatt_somewhere_20241107_1500.csv", &config),
            None
        );
    }

    #[test]
    fn test_extract_date_and_slot() {
        let config = SlotConfig::default();
        let (date, slot) =
            extract_date_and_slot("picopatt_montpellier_antigone_20241107_1122.csv", &config);

        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 11, 7));
        assert_eq!(slot, Slot::M2);
    }

    #[test]
    fn test_extract_date_and_slot_no_token() {
        let config = SlotConfig::default();
        let (date, slot) = extract_date_and_slot("no_timestamp_here.csv", &config);

        assert_eq!(date, None);
        assert_eq!(slot, Slot::Unknown);
    }

    #[test]
    fn test_slot_boundaries() {
        let config = SlotConfig::default();
        let slot_of = |name: &str| extract_date_and_slot(name, &config).1;

        assert_eq!(slot_of("x_20241107_0759.csv"), Slot::Unknown);
        assert_eq!(slot_of("x_20241107_0800.csv"), Slot::M1);
        assert_eq!(slot_of("x_20241107_1959.csv"), Slot::M4);
        assert_eq!(slot_of("x_20241107_2000.csv"), Slot::Unknown);
    }

    #[test]
    fn test_invalid_calendar_date_still_assigns_slot() {
        let config = SlotConfig::default();
        let (date, slot) = extract_date_and_slot("x_20241399_0900.csv", &config);

        assert_eq!(date, None);
        assert_eq!(slot, Slot::M1);
    }

    #[test]
    fn test_timezone_path_agrees_in_winter() {
        let config = SlotConfig::default();
        let name = "picopatt_montpellier_antigone_20241107_1122.csv";

        assert_eq!(assign_slot_with_timezone(name, &config), Slot::M2);
        assert_eq!(extract_date_and_slot(name, &config).1, Slot::M2);
    }

    #[test]
    fn test_timezone_path_no_token() {
        let config = SlotConfig::default();
        assert_eq!(
            assign_slot_with_timezone("no_timestamp_here.csv", &config),
            Slot::Unknown
        );
    }

    #[test]
    fn test_timezone_path_spring_forward_gap() {
        // 02:30 on 2024-03-31 does not exist in Europe/Paris.
        let config = SlotConfig::default();
        assert_eq!(
            assign_slot_with_timezone("x_20240331_0230.csv", &config),
            Slot::Unknown
        );
    }

    #[test]
    fn test_extract_metadata_combines_paths() {
        let meta = extract_metadata(
            "picopatt_montpellier_antigone_20241107_1122.csv",
            &TrackConfig::default(),
            &SlotConfig::default(),
        );

        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 11, 7));
        assert_eq!(meta.slot, Slot::M2);
        assert_eq!(meta.track, Some(Track::Antigone));
    }
}
