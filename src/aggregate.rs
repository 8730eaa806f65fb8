/// Per-state fan-out and snapshot assembly.
///
/// The aggregator owns the run: it fetches every configured state over a
/// bounded worker pool, funnels each state's raw rows through the danger
/// filter and the normalizer, and assembles the final snapshot document
/// with both the flat sequence and the per-state grouping.
///
/// Ordering is deterministic regardless of fetch completion order: workers
/// tag results with the state's enumeration index, and the merge walks
/// states in registry order. One state's failure is isolated — it is
/// logged, contributes an empty grouping entry, and neither cancels nor
/// delays the other fetches.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use threadpool::ThreadPool;

use crate::config::ExtractorConfig;
use crate::filter;
use crate::ingest::infobanjir::{self, SOURCE_URL};
use crate::model::{ExtractError, ExtractionResult, FetchError, RawRow, StationRow};
use crate::normalize;
use crate::states::State;

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Drives one extraction run over an explicit state list.
pub struct Aggregator {
    states: Vec<&'static State>,
    timeout: Duration,
    concurrency: usize,
}

impl Aggregator {
    /// Creates an aggregator from resolved configuration.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            states: config.states.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            concurrency: config.concurrency.max(1),
        }
    }

    /// Runs the full fetch → filter → normalize → assemble pipeline.
    ///
    /// # Errors
    /// - `ExtractError::Client` — the HTTP client could not be built.
    /// - `ExtractError::AllStatesFailed` — every configured state failed;
    ///   a run with at least one successful fetch (even with zero rows)
    ///   returns `Ok`.
    pub fn run(&self, danger_only: bool) -> Result<ExtractionResult, ExtractError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ExtractError::Client(e.to_string()))?;

        let outcomes = self.collect(&client);
        assemble(&self.states, outcomes, danger_only)
    }

    /// Fetches every state over the worker pool, returning results in
    /// state-enumeration order.
    fn collect(&self, client: &reqwest::blocking::Client) -> Vec<Result<Vec<RawRow>, FetchError>> {
        let pool = ThreadPool::new(self.concurrency);
        let (tx, rx) = mpsc::channel();

        for (index, state) in self.states.iter().enumerate() {
            let tx = tx.clone();
            let client = client.clone();
            let code = state.code;
            pool.execute(move || {
                let result = infobanjir::fetch_state(&client, code);
                // A send failure means the receiver is gone; nothing to do.
                let _ = tx.send((index, result));
            });
        }
        drop(tx);

        let mut results: Vec<Option<Result<Vec<RawRow>, FetchError>>> =
            (0..self.states.len()).map(|_| None).collect();
        for (index, result) in rx {
            results[index] = Some(result);
        }

        results
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(FetchError::Network("fetch worker did not report".to_string()))
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Merges per-state fetch outcomes into the snapshot document.
///
/// `results` must be index-aligned with `states`. Rows are filtered (when
/// `danger_only`), normalized, and appended to both the flat sequence and
/// their state's grouped list in arrival order. Every configured state
/// gets a grouping entry, empty on failure or when nothing qualified.
pub fn assemble(
    states: &[&'static State],
    results: Vec<Result<Vec<RawRow>, FetchError>>,
    danger_only: bool,
) -> Result<ExtractionResult, ExtractError> {
    let mut all: Vec<StationRow> = Vec::new();
    let mut grouped: BTreeMap<String, Vec<StationRow>> = BTreeMap::new();
    let mut any_success = false;

    for (state, result) in states.iter().zip(results) {
        let entry = grouped.entry(state.code.to_string()).or_default();
        match result {
            Ok(raw_rows) => {
                any_success = true;
                let before = entry.len();
                for raw in &raw_rows {
                    if danger_only && !filter::exceeds_danger_threshold(raw) {
                        continue;
                    }
                    let row = normalize::normalize(raw, state.code);
                    all.push(row.clone());
                    entry.push(row);
                }
                println!("{}: OK ({} rows)", state.code, entry.len() - before);
            }
            Err(e) => {
                eprintln!("{}: failed -> {}", state.code, e);
            }
        }
    }

    if !any_success {
        return Err(ExtractError::AllStatesFailed);
    }

    Ok(ExtractionResult {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        source: SOURCE_URL.to_string(),
        rows: all.len(),
        all,
        states: grouped,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
