/// Danger-threshold row filter.
///
/// Consulted only when the run is in danger-only mode. The predicate works
/// on RAW rows because the "Threshold Danger" column is not part of the
/// output allow-list — by the time a row is normalized, the threshold is
/// gone.
///
/// Policy is fail-open: a row is dropped only when both the water level
/// and a positive danger threshold parse cleanly and the level is below
/// the threshold. Missing or unparseable data keeps the row, so a state
/// whose table lacks the threshold column is never silently emptied.

use crate::model::{RawRow, COL_THRESHOLD_DANGER, COL_WATER_LEVEL};
use crate::normalize::parse_numeric;

/// Returns true when the row should be kept under danger-only filtering.
///
/// Non-positive thresholds are treated as "no threshold published" and
/// keep the row. Pure function, no I/O.
pub fn exceeds_danger_threshold(raw: &RawRow) -> bool {
    let level = raw.get(COL_WATER_LEVEL).and_then(|cell| parse_numeric(cell));
    let threshold = raw
        .get(COL_THRESHOLD_DANGER)
        .and_then(|cell| parse_numeric(cell));

    match (level, threshold) {
        (Some(level), Some(threshold)) if threshold > 0.0 => level >= threshold,
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_level_at_or_above_threshold_is_kept() {
        let at = raw_row(&[(COL_WATER_LEVEL, "5.0"), (COL_THRESHOLD_DANGER, "5.0")]);
        let above = raw_row(&[(COL_WATER_LEVEL, "5.5"), (COL_THRESHOLD_DANGER, "5.0")]);
        assert!(exceeds_danger_threshold(&at), "level == threshold counts as danger");
        assert!(exceeds_danger_threshold(&above));
    }

    #[test]
    fn test_level_below_threshold_is_dropped() {
        let raw = raw_row(&[(COL_WATER_LEVEL, "4.0"), (COL_THRESHOLD_DANGER, "5.0")]);
        assert!(!exceeds_danger_threshold(&raw));
    }

    #[test]
    fn test_missing_threshold_keeps_the_row() {
        let raw = raw_row(&[(COL_WATER_LEVEL, "4.0")]);
        assert!(
            exceeds_danger_threshold(&raw),
            "absence of threshold data must not cause silent data loss"
        );
    }

    #[test]
    fn test_unparseable_threshold_keeps_the_row() {
        let raw = raw_row(&[(COL_WATER_LEVEL, "4.0"), (COL_THRESHOLD_DANGER, "-")]);
        assert!(exceeds_danger_threshold(&raw));
    }

    #[test]
    fn test_missing_level_keeps_the_row() {
        let raw = raw_row(&[(COL_THRESHOLD_DANGER, "5.0")]);
        assert!(
            exceeds_danger_threshold(&raw),
            "a row that cannot be evaluated defaults to inclusion"
        );
    }

    #[test]
    fn test_unparseable_level_keeps_the_row() {
        let raw = raw_row(&[(COL_WATER_LEVEL, "-"), (COL_THRESHOLD_DANGER, "5.0")]);
        assert!(exceeds_danger_threshold(&raw));
    }

    #[test]
    fn test_non_positive_threshold_keeps_the_row() {
        let zero = raw_row(&[(COL_WATER_LEVEL, "4.0"), (COL_THRESHOLD_DANGER, "0")]);
        let negative = raw_row(&[(COL_WATER_LEVEL, "4.0"), (COL_THRESHOLD_DANGER, "-1.0")]);
        assert!(exceeds_danger_threshold(&zero), "zero threshold means not published");
        assert!(exceeds_danger_threshold(&negative));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = vec![
            raw_row(&[(COL_WATER_LEVEL, "5.5"), (COL_THRESHOLD_DANGER, "5.0")]),
            raw_row(&[(COL_WATER_LEVEL, "4.0"), (COL_THRESHOLD_DANGER, "5.0")]),
            raw_row(&[(COL_WATER_LEVEL, "3.0")]),
        ];
        let once: Vec<_> = rows.iter().filter(|r| exceeds_danger_threshold(r)).collect();
        let twice: Vec<_> = once
            .iter()
            .filter(|r| exceeds_danger_threshold(r))
            .collect();
        assert_eq!(once.len(), 2);
        assert_eq!(once.len(), twice.len(), "re-filtering must keep the same rows");
    }
}
