/// Core data types for the publicinfobanjir water-level extractor.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic and no I/O — only types, column-name constants, and
/// the error enums used across the crate.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

// The source table carries a two-row header: most columns repeat their label
// on both rows, and the threshold group has "Threshold" spanning four
// sub-columns. Flattening joins the levels with a space, which is where the
// doubled names come from. These constants are the canonical keys used for
// raw-row lookup and for the JSON output.

/// Station name column.
pub const COL_STATION_NAME: &str = "Station Name Station Name";

/// District column.
pub const COL_DISTRICT: &str = "District District";

/// Main basin column.
pub const COL_MAIN_BASIN: &str = "Main Basin Main Basin";

/// Sub river basin column.
pub const COL_SUB_RIVER_BASIN: &str = "Sub River Basin Sub River Basin";

/// Last-updated timestamp column (source-formatted text, not reparsed).
pub const COL_LAST_UPDATED: &str = "Last Updated Last Updated";

/// Water level column, in metres.
pub const COL_WATER_LEVEL: &str = "Water Level (m) (Graph) Water Level (m) (Graph)";

/// Danger threshold column. Not part of the output allow-list; consulted
/// only by the danger filter. Absent from some states' tables.
pub const COL_THRESHOLD_DANGER: &str = "Threshold Danger";

/// Output key for the state code stamped onto every row.
pub const STATE_CODE_KEY: &str = "state_code";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A raw table row as extracted from the HTML: flattened column header →
/// trimmed cell text. Untyped; the normalizer and the danger filter look
/// fields up by key.
pub type RawRow = HashMap<String, String>;

/// One monitoring station's reading at fetch time.
///
/// Serializes with the exact flattened source column names so the JSON
/// output matches what downstream consumers already read. Every field is
/// optional except `state_code`, which the aggregator stamps from the fetch
/// parameter — never from the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRow {
    #[serde(rename = "Station Name Station Name")]
    pub station_name: Option<String>,
    #[serde(rename = "District District")]
    pub district: Option<String>,
    #[serde(rename = "Main Basin Main Basin")]
    pub main_basin: Option<String>,
    #[serde(rename = "Sub River Basin Sub River Basin")]
    pub sub_river_basin: Option<String>,
    #[serde(rename = "Last Updated Last Updated")]
    pub last_updated: Option<String>,
    #[serde(rename = "Water Level (m) (Graph) Water Level (m) (Graph)")]
    pub water_level_m: Option<f64>,
    pub state_code: String,
}

// ---------------------------------------------------------------------------
// Snapshot document
// ---------------------------------------------------------------------------

/// The full output document for one extraction run.
///
/// Invariants, maintained by `aggregate::assemble`:
///   - `rows == all.len() == sum of per-state list lengths`
///   - every row in `all` appears in `states[row.state_code]` at the same
///     relative position among rows of that state
///   - `states` has an entry for every configured state code, empty when
///     the fetch failed or matched no rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// ISO 8601 UTC timestamp of assembly.
    pub generated_at: String,
    /// The public page this data was extracted from.
    pub source: String,
    /// Count of entries in `all`.
    pub rows: usize,
    /// Flat sequence of kept rows, in state-enumeration order.
    pub all: Vec<StationRow>,
    /// Per-state grouping, same rows and relative order as `all`.
    pub states: BTreeMap<String, Vec<StationRow>>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or parsing one state's page.
///
/// Always scoped to a single state: the aggregator records the failure,
/// contributes an empty list for that state, and continues the run.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read).
    Network(String),
    /// Non-2xx HTTP response from the source.
    Http(u16),
    /// The response parsed, but no table matched the station-data shape.
    TableNotFound(String),
    /// The markup was structurally unusable (e.g. a bad selector scope).
    Parse(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Http(code) => write!(f, "HTTP error: {}", code),
            FetchError::TableNotFound(msg) => write!(f, "Station table not found: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Errors that end the run. The only class that produces a non-zero exit;
/// per-state and per-field failures are absorbed before reaching here.
#[derive(Debug, PartialEq)]
pub enum ExtractError {
    /// Every configured state failed to fetch — there is nothing to publish.
    AllStatesFailed,
    /// The configuration file was unreadable or invalid.
    Config(String),
    /// The HTTP client could not be constructed.
    Client(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::AllStatesFailed => {
                write!(f, "No data returned for any configured state code")
            }
            ExtractError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ExtractError::Client(msg) => write!(f, "HTTP client error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}
