/// Extractor configuration loader - parses extractor.toml
///
/// The config file is optional: every setting has a default, and a missing
/// file just means "run with defaults against the full state registry".
/// Keeping the state subset and fetch limits in configuration (rather than
/// ambient constants) lets tests and one-off runs substitute a reduced
/// state list without recompiling.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::ExtractError;
use crate::states::{self, State};

/// Default per-request timeout, matching the source site's slow responses.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default fetch concurrency. Kept small so a full run does not hammer the
/// source site; clamped to [`MAX_CONCURRENCY`].
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Upper bound on fetch concurrency regardless of configuration.
pub const MAX_CONCURRENCY: usize = 8;

/// Config file looked for in the working directory when no explicit path
/// is given.
pub const DEFAULT_CONFIG_PATH: &str = "extractor.toml";

// ---------------------------------------------------------------------------
// File schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
struct FetchSection {
    timeout_secs: Option<u64>,
    concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    fetch: FetchSection,
    /// Optional subset of the registry to fetch; defaults to all 16 states.
    state_codes: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved extractor settings handed to the aggregator.
pub struct ExtractorConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Worker pool size for parallel state fetches.
    pub concurrency: usize,
    /// States to fetch, in registry enumeration order.
    pub states: Vec<&'static State>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            states: states::STATE_REGISTRY.iter().collect(),
        }
    }
}

impl ExtractorConfig {
    /// Parses configuration from TOML text, resolving state codes against
    /// the registry.
    ///
    /// # Errors
    /// `ExtractError::Config` for malformed TOML, a zero timeout or
    /// concurrency, an empty `state_codes` list, or a code the registry
    /// does not know.
    pub fn from_toml_str(contents: &str) -> Result<Self, ExtractError> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| ExtractError::Config(format!("invalid TOML: {}", e)))?;

        let timeout_secs = file.fetch.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ExtractError::Config(
                "fetch.timeout_secs must be positive".to_string(),
            ));
        }

        let concurrency = file.fetch.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ExtractError::Config(
                "fetch.concurrency must be positive".to_string(),
            ));
        }

        let selected = match file.state_codes {
            None => states::STATE_REGISTRY.iter().collect(),
            Some(codes) => {
                if codes.is_empty() {
                    return Err(ExtractError::Config(
                        "state_codes must not be empty when present".to_string(),
                    ));
                }
                let mut selected = Vec::with_capacity(codes.len());
                for code in &codes {
                    let state = states::find_state(code).ok_or_else(|| {
                        ExtractError::Config(format!("unknown state code '{}'", code))
                    })?;
                    selected.push(state);
                }
                selected
            }
        };

        Ok(Self {
            timeout_secs,
            concurrency: concurrency.min(MAX_CONCURRENCY),
            states: selected,
        })
    }

    /// Loads configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads from an explicit path when given; otherwise uses
    /// `extractor.toml` in the working directory if present, and the
    /// built-in defaults if not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ExtractError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_full_registry() {
        let config = ExtractorConfig::default();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.states.len(), states::STATE_REGISTRY.len());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = ExtractorConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.states.len(), 16);
    }

    #[test]
    fn test_fetch_section_overrides_defaults() {
        let config =
            ExtractorConfig::from_toml_str("[fetch]\ntimeout_secs = 10\nconcurrency = 2\n")
                .expect("should parse");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.concurrency, 2);
    }

    #[test]
    fn test_state_subset_preserves_requested_order() {
        let config = ExtractorConfig::from_toml_str("state_codes = [\"SAB\", \"PLS\"]\n")
            .expect("should parse");
        let codes: Vec<_> = config.states.iter().map(|s| s.code).collect();
        assert_eq!(codes, vec!["SAB", "PLS"]);
    }

    #[test]
    fn test_unknown_state_code_is_rejected() {
        match ExtractorConfig::from_toml_str("state_codes = [\"PLS\", \"ZZZ\"]\n") {
            Err(ExtractError::Config(msg)) => {
                assert!(msg.contains("ZZZ"), "error should name the bad code: {}", msg);
            }
            Err(other) => panic!("expected Config error, got {:?}", other),
            Ok(_) => panic!("unknown code should not parse"),
        }
    }

    #[test]
    fn test_empty_state_code_list_is_rejected() {
        assert!(matches!(
            ExtractorConfig::from_toml_str("state_codes = []\n"),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(matches!(
            ExtractorConfig::from_toml_str("[fetch]\ntimeout_secs = 0\n"),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(matches!(
            ExtractorConfig::from_toml_str("[fetch]\nconcurrency = 0\n"),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_concurrency_is_clamped_to_ceiling() {
        let config = ExtractorConfig::from_toml_str("[fetch]\nconcurrency = 64\n")
            .expect("should parse");
        assert_eq!(
            config.concurrency, MAX_CONCURRENCY,
            "oversized pools would hammer the source site"
        );
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(matches!(
            ExtractorConfig::from_toml_str("state_codes = [\"PLS\""),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let result = ExtractorConfig::load(Path::new("/nonexistent/extractor.toml"));
        assert!(matches!(result, Err(ExtractError::Config(_))));
    }
}
