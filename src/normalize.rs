/// Raw row → StationRow coercion.
///
/// The extractor hands over whatever columns the source table carried;
/// this module selects the fixed allow-list of output fields by key and
/// coerces cell text into JSON-safe values (text, number, null). Columns
/// the source added, removed, or reordered are irrelevant here — lookup
/// is by flattened header name, never by position.

use crate::model::{
    RawRow, StationRow, COL_DISTRICT, COL_LAST_UPDATED, COL_MAIN_BASIN, COL_STATION_NAME,
    COL_SUB_RIVER_BASIN, COL_WATER_LEVEL,
};

/// Cell markers the source uses for "no reading", compared
/// case-insensitively after trimming.
const NO_DATA_MARKERS: &[&str] = &["-", "--", "n/a", "na", "no data", "nan"];

/// Converts one raw table row into a `StationRow` tagged with the given
/// state code.
///
/// Total function: missing keys, empty cells, and unparseable numbers all
/// degrade to null fields; nothing here fails a row or a run. The state
/// code always comes from the fetch parameter, overwriting any same-named
/// column the source might carry.
pub fn normalize(raw: &RawRow, state_code: &str) -> StationRow {
    StationRow {
        station_name: text_field(raw, COL_STATION_NAME),
        district: text_field(raw, COL_DISTRICT),
        main_basin: text_field(raw, COL_MAIN_BASIN),
        sub_river_basin: text_field(raw, COL_SUB_RIVER_BASIN),
        last_updated: text_field(raw, COL_LAST_UPDATED),
        water_level_m: numeric_field(raw, COL_WATER_LEVEL),
        state_code: state_code.to_string(),
    }
}

/// Coerces cell text to an optional string: trimmed, with empty cells and
/// the source's no-data markers mapped to `None`.
pub fn coerce_text(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if NO_DATA_MARKERS.contains(&lowered.as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Coerces cell text to an optional number. Anything `coerce_text` rejects,
/// plus any string `f64` cannot parse, becomes `None`.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    coerce_text(cell)?.parse::<f64>().ok()
}

fn text_field(raw: &RawRow, key: &str) -> Option<String> {
    raw.get(key).and_then(|cell| coerce_text(cell))
}

fn numeric_field(raw: &RawRow, key: &str) -> Option<f64> {
    raw.get(key).and_then(|cell| parse_numeric(cell))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
