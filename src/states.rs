/// State registry for the publicinfobanjir extractor.
///
/// Defines the canonical list of state codes the aras-air endpoint accepts,
/// along with the state each code denotes. This is the single source of
/// truth for codes — the aggregator, the config loader, and the output
/// grouping all reference states from here rather than hardcoding codes.

// ---------------------------------------------------------------------------
// State metadata
// ---------------------------------------------------------------------------

/// Metadata for a single administrative state.
pub struct State {
    /// Three-letter code used as the `state` query parameter and as the
    /// grouping key in the output document.
    pub code: &'static str,
    /// State or federal territory name.
    pub name: &'static str,
}

/// All states published on publicinfobanjir, in the site's own enumeration
/// order. This order fixes the flat-sequence ordering of the output.
pub static STATE_REGISTRY: &[State] = &[
    State { code: "PLS", name: "Perlis" },
    State { code: "KDH", name: "Kedah" },
    State { code: "PNG", name: "Pulau Pinang" },
    State { code: "PRK", name: "Perak" },
    State { code: "SEL", name: "Selangor" },
    State { code: "WLH", name: "W.P. Kuala Lumpur" },
    State { code: "PTJ", name: "W.P. Putrajaya" },
    State { code: "NSN", name: "Negeri Sembilan" },
    State { code: "MLK", name: "Melaka" },
    State { code: "JHR", name: "Johor" },
    State { code: "PHG", name: "Pahang" },
    State { code: "TRG", name: "Terengganu" },
    State { code: "KEL", name: "Kelantan" },
    State { code: "SRK", name: "Sarawak" },
    State { code: "SAB", name: "Sabah" },
    State { code: "WLP", name: "W.P. Labuan" },
];

/// Returns the codes of all registered states, in enumeration order.
pub fn all_state_codes() -> Vec<&'static str> {
    STATE_REGISTRY.iter().map(|s| s.code).collect()
}

/// Looks up a state by code. Returns `None` if not found.
pub fn find_state(code: &str) -> Option<&'static State> {
    STATE_REGISTRY.iter().find(|s| s.code == code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_sixteen_states() {
        assert_eq!(
            STATE_REGISTRY.len(),
            16,
            "the aras-air endpoint publishes exactly 16 state codes"
        );
    }

    #[test]
    fn test_all_codes_are_three_uppercase_letters() {
        // The endpoint silently returns an empty page for malformed codes,
        // so a bad registry entry would surface as a mystery empty state.
        for state in STATE_REGISTRY {
            assert_eq!(
                state.code.len(),
                3,
                "code for '{}' should be 3 letters, got '{}'",
                state.name,
                state.code
            );
            assert!(
                state.code.chars().all(|c| c.is_ascii_uppercase()),
                "code for '{}' should be uppercase ASCII, got '{}'",
                state.name,
                state.code
            );
        }
    }

    #[test]
    fn test_no_duplicate_codes() {
        let mut seen = std::collections::HashSet::new();
        for state in STATE_REGISTRY {
            assert!(
                seen.insert(state.code),
                "duplicate state code '{}' in STATE_REGISTRY",
                state.code
            );
        }
    }

    #[test]
    fn test_registry_contains_all_expected_codes() {
        let expected = [
            "PLS", "KDH", "PNG", "PRK", "SEL", "WLH", "PTJ", "NSN", "MLK",
            "JHR", "PHG", "TRG", "KEL", "SRK", "SAB", "WLP",
        ];
        let codes = all_state_codes();
        for code in &expected {
            assert!(codes.contains(code), "STATE_REGISTRY missing '{}'", code);
        }
    }

    #[test]
    fn test_find_state_returns_correct_entry() {
        let state = find_state("SEL").expect("Selangor should be in registry");
        assert_eq!(state.code, "SEL");
        assert_eq!(state.name, "Selangor");
    }

    #[test]
    fn test_find_state_returns_none_for_unknown_code() {
        assert!(find_state("XXX").is_none());
        assert!(find_state("sel").is_none(), "lookup is case-sensitive");
    }

    #[test]
    fn test_all_state_codes_helper_matches_registry_length() {
        assert_eq!(all_state_codes().len(), STATE_REGISTRY.len());
    }
}
