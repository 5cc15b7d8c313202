//! Context-token substitution for caller-supplied names.
//!
//! Test steps can refer to values captured earlier in a scenario with
//! `{key}` tokens, e.g. `"{selectedCategory}"`. Every name handed to the
//! acquisition API is passed through a [`ContextResolver`] first.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Replaces placeholders in a caller-supplied string
pub trait ContextResolver: Send + Sync {
    /// Resolve all placeholders in `input`
    fn resolve(&self, input: &str) -> String;
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("context token pattern compiles")
    })
}

/// Scenario-scoped store of context values
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    values: HashMap<String, String>,
}

impl ContextStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous one
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Builder-style [`ContextStore::put`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.put(key, value);
        self
    }

    /// Look up a stored value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Remove every stored value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl ContextResolver for ContextStore {
    fn resolve(&self, input: &str) -> String {
        if self.values.is_empty() || !input.contains('{') {
            return input.to_string();
        }
        token_pattern()
            .replace_all(input, |caps: &Captures<'_>| {
                self.get(&caps[1])
                    .map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}
