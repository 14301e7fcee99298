//! Free-text cleaning for track labels and in-table timestamps.
//!
//! Source labels are free text with inconsistent accents, case, spacing
//! and pluralization. Classification therefore works on accent-stripped,
//! lowercased text with substring matching in a fixed priority order.

use chrono::{NaiveDate, NaiveDateTime};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::TrackConfig;
use crate::core::metadata::Track;

/// Strip diacritics from a string.
///
/// Decomposes via NFKD and drops combining marks, so "Écusson" becomes
/// "Ecusson". Idempotent: applying it twice yields the same result.
pub fn strip_accents(value: &str) -> String {
    value.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Classify cleaned text against keyword rules in priority order.
pub(crate) fn classify(text: &str, rules: &[crate::config::TrackRule]) -> Option<Track> {
    rules
        .iter()
        .find(|rule| text.contains(&rule.keyword))
        .map(|rule| rule.track)
}

/// Normalize a free-text track label to its canonical track.
///
/// Missing input stays missing. Otherwise the label is accent-stripped,
/// lowercased and trimmed, spelling rewrites are applied (singular
/// "boulevard" becomes the canonical plural), and the result is classified
/// by substring containment in priority order. No match yields `None`.
pub fn normalize_track(value: Option<&str>, config: &TrackConfig) -> Option<Track> {
    let value = value?;
    let mut cleaned = strip_accents(value).to_lowercase().trim().to_string();
    for (from, to) in &config.rewrites {
        cleaned = cleaned.replace(from, to);
    }
    classify(&cleaned, &config.label_rules)
}

/// Parse a day-first (French convention) timestamp leniently.
///
/// Tries full date-time forms before date-only; anything unparseable
/// yields `None` rather than an error.
pub fn parse_fr_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();

    for format in ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
