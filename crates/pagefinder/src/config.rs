//! Acquisition configuration.
//!
//! Loaded from YAML with kebab-case keys:
//!
//! ```yaml
//! element-timeout: 15000
//! implicit-wait: 15000
//! match-mode: lenient
//! ```

use crate::result::AcquisitionResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default selection timeout (15 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 15_000;

/// Default driver implicit wait (15 seconds)
pub const DEFAULT_IMPLICIT_WAIT_MS: u64 = 15_000;

/// How observed text is compared against the requested name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Case-insensitive equality or case-insensitive containment
    #[default]
    Lenient,
    /// Case-insensitive equality only
    Strict,
}

impl MatchMode {
    /// Whether `observed` satisfies `target` under this mode
    #[must_use]
    pub fn text_matches(self, observed: &str, target: &str) -> bool {
        if observed.eq_ignore_ascii_case(target) {
            return true;
        }
        let observed = observed.to_lowercase();
        let target = target.to_lowercase();
        match self {
            Self::Strict => observed == target,
            Self::Lenient => observed.contains(&target),
        }
    }

    /// Attribute comparison: exact case-sensitive equality first, then text rules
    #[must_use]
    pub fn attribute_matches(self, observed: &str, target: &str) -> bool {
        observed == target || self.text_matches(observed, target)
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        })
    }
}

/// Settings shared by every selection call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AcquisitionConfig {
    /// Polling timeout in milliseconds
    #[serde(rename = "element-timeout")]
    pub element_timeout_ms: u64,
    /// Implicit wait re-asserted on the driver in milliseconds
    #[serde(rename = "implicit-wait")]
    pub implicit_wait_ms: u64,
    /// Text matching rule
    pub match_mode: MatchMode,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: DEFAULT_ELEMENT_TIMEOUT_MS,
            implicit_wait_ms: DEFAULT_IMPLICIT_WAIT_MS,
            match_mode: MatchMode::Lenient,
        }
    }
}

impl AcquisitionConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a YAML document
    pub fn from_yaml_str(yaml: &str) -> AcquisitionResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> AcquisitionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> AcquisitionResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the element timeout
    #[must_use]
    pub const fn with_element_timeout(mut self, timeout_ms: u64) -> Self {
        self.element_timeout_ms = timeout_ms;
        self
    }

    /// Set the implicit wait
    #[must_use]
    pub const fn with_implicit_wait(mut self, wait_ms: u64) -> Self {
        self.implicit_wait_ms = wait_ms;
        self
    }

    /// Set the match mode
    #[must_use]
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Element timeout as a Duration
    #[must_use]
    pub const fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    /// Implicit wait as a Duration
    #[must_use]
    pub const fn implicit_wait(&self) -> Duration {
        Duration::from_millis(self.implicit_wait_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::result::ErrorClass;
    use proptest::prelude::*;
    use std::io::Write;

    mod match_mode_tests {
        use super::*;

        #[test]
        fn test_lenient_accepts_substring() {
            assert!(MatchMode::Lenient.text_matches("Submit Order", "submit"));
            assert!(MatchMode::Lenient.text_matches("Submit Order", "SUBMIT ORDER"));
        }

        #[test]
        fn test_lenient_rejects_superstring() {
            assert!(!MatchMode::Lenient.text_matches("Submit Order", "order submit"));
            assert!(!MatchMode::Lenient.text_matches("Submit", "Submit Order"));
        }

        #[test]
        fn test_strict_rejects_substring() {
            assert!(MatchMode::Strict.text_matches("Submit Order", "submit order"));
            assert!(!MatchMode::Strict.text_matches("Reorder", "Order"));
        }

        #[test]
        fn test_attribute_exact_first() {
            assert!(MatchMode::Strict.attribute_matches("btn-Primary", "btn-Primary"));
            assert!(MatchMode::Lenient.attribute_matches("btn-primary large", "BTN-PRIMARY"));
        }

        proptest! {
            #[test]
            fn prop_lenient_contains_its_parts(prefix in "[a-z ]{0,8}", target in "[a-zA-Z]{1,8}", suffix in "[a-z ]{0,8}") {
                let observed = format!("{prefix}{target}{suffix}");
                prop_assert!(MatchMode::Lenient.text_matches(&observed, &target.to_uppercase()));
            }

            #[test]
            fn prop_strict_implies_lenient(observed in "[a-zA-Z ]{0,12}", target in "[a-zA-Z ]{0,12}") {
                if MatchMode::Strict.text_matches(&observed, &target) {
                    prop_assert!(MatchMode::Lenient.text_matches(&observed, &target));
                }
            }
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = AcquisitionConfig::default();
            assert_eq!(config.element_timeout(), Duration::from_millis(15_000));
            assert_eq!(config.implicit_wait(), Duration::from_millis(15_000));
            assert_eq!(config.match_mode, MatchMode::Lenient);
        }

        #[test]
        fn test_builder() {
            let config = AcquisitionConfig::new()
                .with_element_timeout(250)
                .with_implicit_wait(10)
                .with_match_mode(MatchMode::Strict);
            assert_eq!(config.element_timeout_ms, 250);
            assert_eq!(config.implicit_wait_ms, 10);
            assert_eq!(config.match_mode, MatchMode::Strict);
        }

        #[test]
        fn test_yaml_partial_uses_defaults() {
            let config = AcquisitionConfig::from_yaml_str("element-timeout: 500\n").unwrap();
            assert_eq!(config.element_timeout_ms, 500);
            assert_eq!(config.implicit_wait_ms, DEFAULT_IMPLICIT_WAIT_MS);
        }

        #[test]
        fn test_yaml_match_mode() {
            let config = AcquisitionConfig::from_yaml_str("match-mode: strict").unwrap();
            assert_eq!(config.match_mode, MatchMode::Strict);
        }

        #[test]
        fn test_yaml_unknown_key_is_configuration_error() {
            let err = AcquisitionConfig::from_yaml_str("element-timeot: 5").unwrap_err();
            assert_eq!(err.class(), ErrorClass::Configuration);
        }

        #[test]
        fn test_yaml_round_trip() {
            let config = AcquisitionConfig::new().with_match_mode(MatchMode::Strict);
            let yaml = config.to_yaml().unwrap();
            assert!(yaml.contains("match-mode: strict"));
            assert_eq!(AcquisitionConfig::from_yaml_str(&yaml).unwrap(), config);
        }

        #[test]
        fn test_from_path() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "implicit-wait: 42").unwrap();
            let config = AcquisitionConfig::from_path(file.path()).unwrap();
            assert_eq!(config.implicit_wait_ms, 42);
        }

        #[test]
        fn test_from_missing_path() {
            let err = AcquisitionConfig::from_path("/nonexistent/pagefinder.yaml").unwrap_err();
            assert!(matches!(err, crate::result::AcquisitionError::Io(_)));
        }
    }
}
