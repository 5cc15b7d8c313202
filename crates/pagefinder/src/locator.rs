//! Locators: strategy + value pairs and match-any composites.
//!
//! A [`Locator`] unions one or more [`Selector`]s; the driver returns whatever
//! matches any of them. Attribute-driven selectors are synthesized by
//! [`generate_css_by_attributes`] and [`generate_xpath_by_attributes`].

use crate::result::{AcquisitionError, AcquisitionResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selector strategies that can be declared for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectorType {
    /// `id` attribute
    Id,
    /// `name` attribute
    Name,
    /// Tag name
    TagName,
    /// Class name
    ClassName,
    /// CSS selector
    Css,
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath,
    /// Exact text content
    Text,
}

impl SelectorType {
    /// All strategies in declaration order
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::Name,
        Self::TagName,
        Self::ClassName,
        Self::Css,
        Self::XPath,
        Self::Text,
    ];

    /// Short name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::TagName => "tagName",
            Self::ClassName => "className",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::Text => "text",
        }
    }

    /// Key of the backing field in a JSON element declaration
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::Css => "cssSelector",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for SelectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectorType {
    type Err = AcquisitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .or_else(|| match s.trim().to_ascii_lowercase().as_str() {
                "cssselector" => Some(Self::Css),
                "tag" => Some(Self::TagName),
                "class" => Some(Self::ClassName),
                _ => None,
            })
            .ok_or_else(|| AcquisitionError::configuration(format!("Unknown selector type '{s}'")))
    }
}

/// One locating strategy with its value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "camelCase")]
pub enum Selector {
    /// Match by `id`
    Id(String),
    /// Match by `name`
    Name(String),
    /// Match by tag name
    TagName(String),
    /// Match by class name
    ClassName(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Exact text match, expressed as XPath
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::XPath(format!("//*[text()='{text}']"))
    }

    /// Build the selector for a strategy from a raw declared value
    #[must_use]
    pub fn for_type(selector_type: SelectorType, value: &str) -> Self {
        match selector_type {
            SelectorType::Id => Self::Id(value.to_string()),
            SelectorType::Name => Self::Name(value.to_string()),
            SelectorType::TagName => Self::TagName(value.to_string()),
            SelectorType::ClassName => Self::ClassName(value.to_string()),
            SelectorType::Css => Self::Css(value.to_string()),
            SelectorType::XPath => Self::XPath(value.to_string()),
            SelectorType::Text => Self::text(value),
        }
    }

    /// Strategy name
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::TagName(_) => "tagName",
            Self::ClassName(_) => "className",
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
        }
    }

    /// Raw selector value
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::Name(v)
            | Self::TagName(v)
            | Self::ClassName(v)
            | Self::Css(v)
            | Self::XPath(v) => v,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "By.{}: {}", self.strategy(), self.value())
    }
}

/// A match-any union of selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator {
    selectors: Vec<Selector>,
}

impl Locator {
    /// Locator with a single strategy
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }

    /// Union of several strategies
    #[must_use]
    pub fn any(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            selectors: selectors.into_iter().collect(),
        }
    }

    /// Add another strategy to the union
    #[must_use]
    pub fn or(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// The strategies, in the order they were requested
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Number of strategies
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether the union is empty (matches nothing)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("By.all(")?;
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_str(")")
    }
}

/// Conjoin attribute predicates into one CSS selector: `[a = '1'][b = '2']`
#[must_use]
pub fn generate_css_by_attributes<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs.iter().fold(String::new(), |mut selector, (attr, value)| {
        selector.push_str(&format!("[{} = '{}']", attr.as_ref(), value.as_ref()));
        selector
    })
}

/// Conjoin attribute predicates into one XPath: `//*[@a = '1'][@b = '2']`
#[must_use]
pub fn generate_xpath_by_attributes<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .fold(String::from("//*"), |mut selector, (attr, value)| {
            selector.push_str(&format!("[@{} = '{}']", attr.as_ref(), value.as_ref()));
            selector
        })
}

/// Build an attribute selector using a primary strategy.
///
/// Only `Css` and `XPath` can conjoin attribute predicates; anything else is
/// a configuration error.
pub fn selector_by_attributes<K, V>(
    strategy: SelectorType,
    pairs: &[(K, V)],
) -> AcquisitionResult<Selector>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    match strategy {
        SelectorType::Css => Ok(Selector::Css(generate_css_by_attributes(pairs))),
        SelectorType::XPath => Ok(Selector::XPath(generate_xpath_by_attributes(pairs))),
        other => Err(AcquisitionError::configuration(format!(
            "'{other}' is not a primary selector type (expected css or xpath)"
        ))),
    }
}
