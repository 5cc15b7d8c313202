//! JSON selector repositories.
//!
//! An alternative to typed page models: elements are declared in a JSON
//! document with one optional field per selector strategy, and acquisition
//! queries the driver directly with a match-any locator.
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "name": "LoginPage",
//!       "elements": [
//!         { "elementName": "submit", "id": "login-btn", "cssSelector": "form button" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Strategy fields are kept as raw JSON values. Strings, numbers and booleans
//! are used as their text; null, arrays and objects only disable that
//! strategy.

use crate::driver::{Driver, ElementHandle};
use crate::locator::{selector_by_attributes, Locator, Selector, SelectorType};
use crate::result::{AcquisitionError, AcquisitionResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

// =============================================================================
// DOCUMENT
// =============================================================================

/// Selector declarations for one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementEntry {
    /// Element name used by test steps
    pub element_name: String,
    /// Declared strategies, keyed by their JSON field name
    #[serde(flatten)]
    pub strategies: Map<String, Value>,
}

impl ElementEntry {
    /// Declared value for a strategy, when present and a scalar
    #[must_use]
    pub fn strategy(&self, selector_type: SelectorType) -> Option<Cow<'_, str>> {
        match self.strategies.get(selector_type.json_key())? {
            Value::String(value) => Some(Cow::Borrowed(value)),
            Value::Number(value) => Some(Cow::Owned(value.to_string())),
            Value::Bool(value) => Some(Cow::Owned(value.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Strategies usable from this entry, in declaration order of [`SelectorType::ALL`]
    #[must_use]
    pub fn declared_types(&self) -> Vec<SelectorType> {
        SelectorType::ALL
            .into_iter()
            .filter(|t| self.strategy(*t).is_some())
            .collect()
    }

    /// Match-any locator from the requested strategies this entry declares
    #[must_use]
    pub fn locator(&self, selector_types: &[SelectorType]) -> Locator {
        Locator::any(selector_types.iter().filter_map(|t| {
            let selector = self.strategy(*t).map(|value| Selector::for_type(*t, &value));
            if selector.is_none() {
                debug!(element = %self.element_name, strategy = %t, "strategy not declared, skipping");
            }
            selector
        }))
    }
}

/// Element declarations of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Page name
    pub name: String,
    /// Declared elements
    #[serde(default)]
    pub elements: Vec<ElementEntry>,
}

impl PageEntry {
    /// Look up an element declaration
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ElementEntry> {
        self.elements.iter().find(|e| e.element_name == name)
    }
}

/// A JSON selector repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRepository {
    /// Declared pages
    pub pages: Vec<PageEntry>,
}

impl FromStr for ObjectRepository {
    type Err = AcquisitionError;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ObjectRepository {
    /// Parse from an already decoded JSON value
    pub fn from_value(value: Value) -> AcquisitionResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> AcquisitionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Look up a page declaration
    #[must_use]
    pub fn page(&self, name: &str) -> Option<&PageEntry> {
        self.pages.iter().find(|p| p.name == name)
    }

    /// Look up an element declaration.
    ///
    /// An unknown page is an error; an unknown element on a known page is
    /// `Ok(None)`.
    pub fn element(&self, element: &str, page: &str) -> AcquisitionResult<Option<&ElementEntry>> {
        let page_entry = self
            .page(page)
            .ok_or_else(|| AcquisitionError::not_found("page", page))?;
        Ok(page_entry.element(element))
    }

    /// Match-any locator for a declared element.
    ///
    /// Unlike [`locator_for`], an unknown element is `NotFound` and an
    /// element declaring none of the requested strategies is a
    /// `Configuration` error.
    pub fn declared_locator(
        &self,
        element: &str,
        page: &str,
        selector_types: &[SelectorType],
    ) -> AcquisitionResult<Locator> {
        let locator = locator_for(element, page, self, selector_types)?
            .ok_or_else(|| AcquisitionError::not_found(format!("element on {page}"), element))?;
        if locator.is_empty() {
            return Err(AcquisitionError::configuration(format!(
                "element '{element}' on {page} declares none of the requested selector types"
            )));
        }
        Ok(locator)
    }
}

/// Build the match-any locator for an element declared in `document`.
///
/// Requested strategies the element does not declare (or declares with
/// null, an array or an object) are skipped. Returns `Ok(None)` when the page exists
/// but the element does not.
pub fn locator_for(
    element: &str,
    page: &str,
    document: &ObjectRepository,
    selector_types: &[SelectorType],
) -> AcquisitionResult<Option<Locator>> {
    Ok(document
        .element(element, page)?
        .map(|entry| entry.locator(selector_types)))
}

// =============================================================================
// ACQUISITION
// =============================================================================

/// Acquires elements declared in a JSON repository through a driver
#[derive(Clone)]
pub struct JsonPageObjects {
    driver: Arc<dyn Driver>,
}

impl fmt::Debug for JsonPageObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonPageObjects").finish_non_exhaustive()
    }
}

impl JsonPageObjects {
    /// Create over a driver session
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    /// First element matching any of the requested strategies
    pub fn element_from_page(
        &self,
        element: &str,
        page: &str,
        document: &ObjectRepository,
        selector_types: &[SelectorType],
    ) -> AcquisitionResult<ElementHandle> {
        info!(element, page, "Acquiring element from JSON repository");
        let locator = document.declared_locator(element, page, selector_types)?;
        Ok(self.driver.find_element(&locator)?)
    }

    /// All elements matching any of the requested strategies
    pub fn elements_from_page(
        &self,
        element: &str,
        page: &str,
        document: &ObjectRepository,
        selector_types: &[SelectorType],
    ) -> AcquisitionResult<Vec<ElementHandle>> {
        info!(element, page, "Acquiring elements from JSON repository");
        let locator = document.declared_locator(element, page, selector_types)?;
        Ok(self.driver.find_elements(&locator)?)
    }

    /// First element carrying every `(attribute, value)` pair
    pub fn element_by_attributes<K, V>(
        &self,
        strategy: SelectorType,
        pairs: &[(K, V)],
    ) -> AcquisitionResult<ElementHandle>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let locator = Locator::new(selector_by_attributes(strategy, pairs)?);
        info!(%locator, "Acquiring element by attributes");
        Ok(self.driver.find_element(&locator)?)
    }

    /// All elements carrying every `(attribute, value)` pair
    pub fn elements_by_attributes<K, V>(
        &self,
        strategy: SelectorType,
        pairs: &[(K, V)],
    ) -> AcquisitionResult<Vec<ElementHandle>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let locator = Locator::new(selector_by_attributes(strategy, pairs)?);
        info!(%locator, "Acquiring elements by attributes");
        Ok(self.driver.find_elements(&locator)?)
    }
}
