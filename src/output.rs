/// Snapshot artifact writers.
///
/// The JSON document is the published artifact downstream consumers read
/// over static hosting; the CSV export mirrors the flat row sequence for
/// spreadsheet use. Both writers create missing parent directories so a
/// fresh checkout can write straight to `docs/data.json`.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::model::{
    ExtractionResult, COL_DISTRICT, COL_LAST_UPDATED, COL_MAIN_BASIN, COL_STATION_NAME,
    COL_SUB_RIVER_BASIN, COL_WATER_LEVEL, STATE_CODE_KEY,
};

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Writes the snapshot document as pretty-printed JSON.
pub fn write_json(path: &Path, result: &ExtractionResult) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    Ok(())
}

/// Writes the flat row sequence as CSV: one header line of the output
/// column names, then one line per row with null fields left empty.
pub fn write_csv(path: &Path, result: &ExtractionResult) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        COL_STATION_NAME,
        COL_DISTRICT,
        COL_MAIN_BASIN,
        COL_SUB_RIVER_BASIN,
        COL_LAST_UPDATED,
        COL_WATER_LEVEL,
        STATE_CODE_KEY,
    ])?;

    for row in &result.all {
        let water_level = row.water_level_m.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([
            row.station_name.as_deref().unwrap_or(""),
            row.district.as_deref().unwrap_or(""),
            row.main_basin.as_deref().unwrap_or(""),
            row.sub_river_basin.as_deref().unwrap_or(""),
            row.last_updated.as_deref().unwrap_or(""),
            water_level.as_str(),
            row.state_code.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StationRow;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample_result() -> ExtractionResult {
        let row = StationRow {
            station_name: Some("Sungai Klang di Kg. Berembang".to_string()),
            district: Some("Gombak".to_string()),
            main_basin: Some("Klang".to_string()),
            sub_river_basin: None,
            last_updated: Some("05/08/2026 14:00".to_string()),
            water_level_m: Some(5.52),
            state_code: "SEL".to_string(),
        };
        let mut states = BTreeMap::new();
        states.insert("SEL".to_string(), vec![row.clone()]);
        states.insert("SAB".to_string(), Vec::new());
        ExtractionResult {
            generated_at: "2026-08-05T06:00:00Z".to_string(),
            source: "https://publicinfobanjir.water.gov.my/aras-air/?lang=en".to_string(),
            rows: 1,
            all: vec![row],
            states,
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("banjir_extract_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_json_round_trips_the_document() {
        let path = scratch_path("roundtrip.json");
        write_json(&path, &sample_result()).expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("file should exist");
        let parsed: ExtractionResult =
            serde_json::from_str(&contents).expect("document should deserialize");
        assert_eq!(parsed.rows, 1);
        assert_eq!(parsed.all[0].water_level_m, Some(5.52));
        assert_eq!(parsed.states["SAB"], Vec::new());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_json_creates_parent_directories() {
        let dir = scratch_path("nested_out");
        let path = dir.join("docs").join("data.json");
        write_json(&path, &sample_result()).expect("write should create parents");
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_json_uses_source_column_keys_and_nulls() {
        let path = scratch_path("keys.json");
        write_json(&path, &sample_result()).expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("file should exist");
        let value: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
        let first = &value["all"][0];
        assert_eq!(first[COL_STATION_NAME], "Sungai Klang di Kg. Berembang");
        assert!(first[COL_SUB_RIVER_BASIN].is_null());
        assert_eq!(first[STATE_CODE_KEY], "SEL");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_csv_mirrors_the_flat_sequence() {
        let path = scratch_path("flat.csv");
        write_csv(&path, &sample_result()).expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("file should exist");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "header plus one row");
        assert!(lines[0].contains(COL_STATION_NAME));
        assert!(lines[1].contains("5.52"));
        assert!(lines[1].contains("SEL"));

        let _ = fs::remove_file(&path);
    }
}
