/// publicinfobanjir aras-air page client.
///
/// Handles URL construction, HTTP fetch, and HTML table extraction for the
/// per-state water-level pages served at:
///   https://publicinfobanjir.water.gov.my/aras-air/data-paras-air/aras-air-data/
///
/// The pages are server-rendered HTML, not an API: each response carries a
/// station-data table alongside whatever layout markup the site wraps it
/// in. The extractor locates the right table by its column names rather
/// than by position, so wrapper tables and reordered columns do not break
/// it. See `fixtures.rs` for annotated examples of the page structure.

use scraper::{ElementRef, Html, Selector};

use crate::model::{FetchError, RawRow};

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// The public page downstream consumers are pointed at; recorded verbatim
/// in the output document's `source` field.
pub const SOURCE_URL: &str = "https://publicinfobanjir.water.gov.my/aras-air/?lang=en";

/// The data endpoint actually fetched, parameterized by state code.
const DATA_BASE_URL: &str =
    "https://publicinfobanjir.water.gov.my/aras-air/data-paras-air/aras-air-data/";

/// Column-name fragments that identify the station-data table. Matching is
/// case-insensitive substring, so renamed-but-recognizable headers (extra
/// units, doubled labels) still count.
const RECOGNIZED_COLUMNS: &[&str] = &[
    "station name",
    "district",
    "main basin",
    "sub river basin",
    "last updated",
    "water level",
];

/// Minimum recognized columns for a table to qualify as station data.
const MIN_RECOGNIZED_COLUMNS: usize = 3;

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the aras-air data URL for one state code.
///
/// District and station are always requested as `ALL`; filtering down to a
/// danger subset happens locally, never at the source.
pub fn build_state_url(state_code: &str) -> String {
    format!(
        "{}?district=ALL&station=ALL&lang=en&state={}",
        DATA_BASE_URL,
        urlencoding::encode(state_code)
    )
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Fetches one state's page and extracts its station table into raw rows.
///
/// # Errors
/// - `FetchError::Network` — transport failure (connect, timeout, body read).
/// - `FetchError::Http` — non-2xx response.
/// - `FetchError::TableNotFound` / `FetchError::Parse` — see
///   [`parse_station_table`].
///
/// Every error is scoped to this one state; callers isolate it and move on.
pub fn fetch_state(
    client: &reqwest::blocking::Client,
    state_code: &str,
) -> Result<Vec<RawRow>, FetchError> {
    let url = build_state_url(state_code);

    let response = client
        .get(&url)
        .header("Accept", "text/html")
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status.as_u16()));
    }

    let body = response.text().map_err(|e| FetchError::Network(e.to_string()))?;
    parse_station_table(&body)
}

// ---------------------------------------------------------------------------
// Table extraction
// ---------------------------------------------------------------------------

/// Locates the station-data table in a page and extracts its body rows as
/// header-keyed records.
///
/// Every `<table>` in the document is a candidate. Each is scored by how
/// many recognized station-data columns its flattened header carries; the
/// best-scoring table wins, with ties broken toward the table containing
/// the fewest nested tables (so a layout wrapper never beats the data
/// table inside it).
///
/// # Errors
/// - `FetchError::TableNotFound` — no table reached the recognition
///   threshold (error pages, maintenance notices, empty responses).
/// - `FetchError::Parse` — structurally unusable markup.
pub fn parse_station_table(html: &str) -> Result<Vec<RawRow>, FetchError> {
    let document = Html::parse_document(html);
    let table_sel = parse_selector("table")?;

    let mut best: Option<(usize, usize, ElementRef)> = None;
    for table in document.select(&table_sel) {
        let headers = flatten_headers(&header_rows(table)?);
        let score = recognized_column_count(&headers);
        if score < MIN_RECOGNIZED_COLUMNS {
            continue;
        }
        let nested = table.select(&table_sel).count();
        let better = match &best {
            None => true,
            Some((s, n, _)) => score > *s || (score == *s && nested < *n),
        };
        if better {
            best = Some((score, nested, table));
        }
    }

    let (_, _, table) = best.ok_or_else(|| {
        FetchError::TableNotFound("no table matching the station-data columns".to_string())
    })?;

    extract_rows(table)
}

/// Parses a CSS selector string, mapping failure to a [`FetchError`].
fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector)
        .map_err(|e| FetchError::Parse(format!("invalid CSS selector '{}': {}", selector, e)))
}

/// One header cell with its span attributes.
struct HeaderCell {
    text: String,
    colspan: usize,
    rowspan: usize,
}

/// Collapses an element's text to single-space-separated words. Cells often
/// wrap their value in links or spans with layout whitespace around them.
fn cell_text(el: &ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a span attribute, defaulting to 1 for absent or malformed values.
fn span_attr(el: &ElementRef, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

/// Collects a table's header rows: `thead tr` when a `thead` exists,
/// otherwise the leading run of all-`th` rows.
fn header_rows(table: ElementRef) -> Result<Vec<Vec<HeaderCell>>, FetchError> {
    let cell_sel = parse_selector("th, td")?;
    let thead_tr_sel = parse_selector("thead tr")?;

    let collect = |tr: ElementRef| -> Vec<HeaderCell> {
        tr.select(&cell_sel)
            .map(|cell| HeaderCell {
                text: cell_text(&cell),
                colspan: span_attr(&cell, "colspan"),
                rowspan: span_attr(&cell, "rowspan"),
            })
            .collect()
    };

    let mut rows: Vec<Vec<HeaderCell>> =
        table.select(&thead_tr_sel).map(collect).collect();
    if !rows.is_empty() {
        return Ok(rows);
    }

    let tr_sel = parse_selector("tr")?;
    let th_sel = parse_selector("th")?;
    for tr in table.select(&tr_sel) {
        let cells = tr.select(&cell_sel).count();
        let th_cells = tr.select(&th_sel).count();
        if cells > 0 && cells == th_cells {
            rows.push(collect(tr));
        } else {
            break;
        }
    }
    Ok(rows)
}

/// Flattens a (possibly multi-row) header into one name per column by
/// expanding colspan/rowspan into a grid and joining each column's level
/// texts with a space.
///
/// This reproduces the doubled names the source's two-row header yields:
/// a `rowspan="2"` cell fills both levels, so "Station Name" flattens to
/// "Station Name Station Name", while the spanning "Threshold" group
/// flattens to "Threshold Normal" … "Threshold Danger". A single-row
/// header flattens to its plain names.
fn flatten_headers(rows: &[Vec<HeaderCell>]) -> Vec<String> {
    let mut grid: Vec<Vec<Option<String>>> = vec![Vec::new(); rows.len()];

    for (r, row) in rows.iter().enumerate() {
        let mut c = 0;
        for cell in row {
            // Skip columns already claimed by rowspans from rows above.
            while matches!(grid[r].get(c), Some(Some(_))) {
                c += 1;
            }
            let end_row = (r + cell.rowspan).min(rows.len());
            for level in grid.iter_mut().take(end_row).skip(r) {
                for cc in c..c + cell.colspan {
                    if level.len() <= cc {
                        level.resize(cc + 1, None);
                    }
                    level[cc] = Some(cell.text.clone());
                }
            }
            c += cell.colspan;
        }
    }

    let n_cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    (0..n_cols)
        .map(|c| {
            grid.iter()
                .filter_map(|level| level.get(c).and_then(|v| v.as_deref()))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Counts how many recognized station-data columns appear in a flattened
/// header list.
fn recognized_column_count(headers: &[String]) -> usize {
    RECOGNIZED_COLUMNS
        .iter()
        .filter(|fragment| {
            headers
                .iter()
                .any(|h| h.to_lowercase().contains(*fragment))
        })
        .count()
}

/// Returns true when the row sits inside a `thead`.
fn in_thead(tr: ElementRef) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "thead")
}

/// Extracts a table's data rows keyed by its flattened header names.
fn extract_rows(table: ElementRef) -> Result<Vec<RawRow>, FetchError> {
    let headers = flatten_headers(&header_rows(table)?);
    if headers.is_empty() {
        return Err(FetchError::Parse(
            "station table has no header cells".to_string(),
        ));
    }

    let tr_sel = parse_selector("tr")?;
    let td_sel = parse_selector("td")?;

    let mut rows = Vec::new();
    for tr in table.select(&tr_sel) {
        // Header rows are all-th or live in thead; data rows carry td cells.
        if tr.select(&td_sel).next().is_none() || in_thead(tr) {
            continue;
        }

        let cells: Vec<(String, usize)> = tr
            .select(&td_sel)
            .map(|td| (cell_text(&td), span_attr(&td, "colspan")))
            .collect();

        // A single cell spanning the row is the table's empty-state
        // marker ("No data available in table"), not a reading.
        if headers.len() > 1 && cells.len() == 1 && cells[0].1 > 1 {
            continue;
        }

        let mut expanded = Vec::with_capacity(headers.len());
        for (text, colspan) in cells {
            for _ in 0..colspan {
                expanded.push(text.clone());
            }
        }

        let mut record = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            record.insert(header.clone(), expanded.get(i).cloned().unwrap_or_default());
        }
        rows.push(record);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
