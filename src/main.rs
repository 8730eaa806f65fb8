//! Public Infobanjir Water Level Extractor
//!
//! Fetches the per-state station tables from publicinfobanjir.water.gov.my,
//! normalizes them into one snapshot document, and writes it out as JSON
//! (plus an optional CSV mirror of the flat row list). Designed to be run
//! by an external scheduler that commits the JSON artifact on change.
//!
//! Usage:
//!   cargo run --release -- --json docs/data.json
//!   cargo run --release -- --danger-only --csv out/levels.csv
//!
//! Exit status is 0 whenever the JSON artifact was written — a zero-row
//! snapshot is a valid outcome — and 1 only on total failure (bad config,
//! every state failed, or the artifact could not be written).

use std::env;
use std::path::PathBuf;
use std::process;

use banjir_extract::aggregate::Aggregator;
use banjir_extract::config::ExtractorConfig;
use banjir_extract::output;

const DEFAULT_JSON_PATH: &str = "docs/data.json";

fn main() {
    println!("🌊 Public Infobanjir Water Level Extractor");
    println!("==========================================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut json_path = PathBuf::from(DEFAULT_JSON_PATH);
    let mut csv_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut danger_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                if i + 1 < args.len() {
                    json_path = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --json requires a path");
                    process::exit(1);
                }
            }
            "--csv" => {
                if i + 1 < args.len() {
                    csv_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --csv requires a path");
                    process::exit(1);
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a path");
                    process::exit(1);
                }
            }
            "--danger-only" => {
                danger_only = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!(
                    "Usage: {} [--json PATH] [--csv PATH] [--config PATH] [--danger-only]",
                    args[0]
                );
                process::exit(1);
            }
        }
    }

    // Resolve configuration
    println!("📋 Loading configuration...");
    let config = match ExtractorConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ {}\n", e);
            process::exit(1);
        }
    };
    println!(
        "   {} states, timeout {}s, concurrency {}",
        config.states.len(),
        config.timeout_secs,
        config.concurrency
    );
    if danger_only {
        println!("   Danger-only filtering enabled");
    }

    // Run the extraction
    println!("\n🌐 Fetching station tables...");
    let aggregator = Aggregator::new(&config);
    let result = match aggregator.run(danger_only) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("\n❌ {}\n", e);
            process::exit(1);
        }
    };
    println!(
        "\n📦 {} rows across {} states",
        result.rows,
        result.states.len()
    );

    // Write artifacts
    if let Err(e) = output::write_json(&json_path, &result) {
        eprintln!("\n❌ Failed to write {}: {}\n", json_path.display(), e);
        process::exit(1);
    }
    println!("💾 Saved JSON to {}", json_path.display());

    if let Some(csv_path) = csv_path {
        if let Err(e) = output::write_csv(&csv_path, &result) {
            eprintln!("\n❌ Failed to write {}: {}\n", csv_path.display(), e);
            process::exit(1);
        }
        println!("💾 Saved CSV to {}", csv_path.display());
    }
}
