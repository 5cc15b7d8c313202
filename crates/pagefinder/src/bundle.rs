//! Bundles carry a resolved element back to the caller together with the
//! specification row that requested it.

use crate::driver::ElementHandle;
use crate::result::{AcquisitionError, AcquisitionResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Specification key naming the element of a bundle row
pub const ELEMENT_NAME: &str = "Element Name";

/// Specification key naming the input element of a form row
pub const INPUT_ELEMENT: &str = "Input Element";

/// Specification key holding the value to type into a form input
pub const INPUT: &str = "Input";

/// Specification key holding the text that selects a component
pub const SELECTOR_TEXT: &str = "Selector Text";

/// Specification key naming the component child compared with the selector text
pub const SELECTOR_ELEMENT: &str = "Selector Element";

/// Specification key naming the element to take from the selected component
pub const TARGET_ELEMENT: &str = "Target Element";

/// One row of a step's data table: ordered string keys to string values.
///
/// Serializes as a map in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specification {
    entries: Vec<(String, String)>,
}

impl Specification {
    /// Create an empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add or replace an entry
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace an entry, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a value the operation cannot proceed without
    pub fn require(&self, key: &str) -> AcquisitionResult<&str> {
        self.get(key).ok_or_else(|| {
            AcquisitionError::configuration(format!("specification row has no '{key}' entry"))
        })
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Specification {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (key, value) in iter {
            spec.insert(key, value);
        }
        spec
    }
}

impl Serialize for Specification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct SpecificationVisitor;

impl<'de> Visitor<'de> for SpecificationVisitor {
    type Value = Specification;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of string keys to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut spec = Specification::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            spec.insert(key, value);
        }
        Ok(spec)
    }
}

impl<'de> Deserialize<'de> for Specification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SpecificationVisitor)
    }
}

/// A name, a resolved payload and the row that asked for it
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle<T = ElementHandle> {
    name: String,
    element: T,
    metadata: Specification,
}

impl<T> Bundle<T> {
    /// Create a bundle
    #[must_use]
    pub fn new(name: impl Into<String>, element: T, metadata: Specification) -> Self {
        Self {
            name: name.into(),
            element,
            metadata,
        }
    }

    /// Name the payload was resolved from
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved payload
    #[must_use]
    pub const fn element(&self) -> &T {
        &self.element
    }

    /// Caller-supplied metadata
    #[must_use]
    pub const fn metadata(&self) -> &Specification {
        &self.metadata
    }

    /// Split into its parts
    #[must_use]
    pub fn into_parts(self) -> (String, T, Specification) {
        (self.name, self.element, self.metadata)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockElement;
    use crate::result::ErrorClass;

    #[test]
    fn test_specification_keeps_order() {
        let spec = Specification::new()
            .with(ELEMENT_NAME, "email")
            .with("Value", "ada@example.com")
            .with(ELEMENT_NAME, "username");
        assert_eq!(
            spec.iter().collect::<Vec<_>>(),
            vec![(ELEMENT_NAME, "username"), ("Value", "ada@example.com")]
        );
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn test_require_missing_key() {
        let spec: Specification = [("Input", "secret")].into_iter().collect();
        assert_eq!(spec.require(INPUT).unwrap(), "secret");
        let err = spec.require(INPUT_ELEMENT).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Configuration);
        assert!(err.to_string().contains("Input Element"));
    }

    #[test]
    fn test_specification_json_shape() {
        let spec = Specification::new().with("a", "1").with("b", "2");
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn test_specification_from_json_object_keeps_order() {
        let spec: Specification =
            serde_json::from_str(r#"{"Input":"x","Element Name":"email","Input":"y"}"#).unwrap();
        assert_eq!(
            spec.iter().collect::<Vec<_>>(),
            vec![(INPUT, "y"), (ELEMENT_NAME, "email")]
        );
        assert_eq!(serde_json::to_string(&spec).unwrap(), r#"{"Input":"y","Element Name":"email"}"#);
    }

    #[test]
    fn test_specification_from_yaml_row() {
        let spec: Specification =
            serde_yaml_ng::from_str("Target Element: price\nSelector Text: Turntable\n").unwrap();
        assert_eq!(
            spec.iter().collect::<Vec<_>>(),
            vec![(TARGET_ELEMENT, "price"), (SELECTOR_TEXT, "Turntable")]
        );
    }

    #[test]
    fn test_specification_rejects_sequence() {
        assert!(serde_json::from_str::<Specification>(r#"[["a","1"]]"#).is_err());
    }

    #[test]
    fn test_bundle_parts() {
        let handle = MockElement::new("Email").handle();
        let bundle = Bundle::new("email", handle.clone(), Specification::new().with("k", "v"));
        assert_eq!(bundle.name(), "email");
        assert_eq!(bundle.element(), &handle);
        assert_eq!(bundle.metadata().get("k"), Some("v"));
        let (name, element, metadata) = bundle.into_parts();
        assert_eq!((name.as_str(), element, metadata.len()), ("email", handle, 1));
    }
}
