//! Structural field access for pages and components.
//!
//! Pages and components share one shape: named fields holding elements,
//! element lists, nested components or component lists. [`FieldContainer`]
//! exposes that shape without each model writing accessors by hand; the
//! `FieldContainer` derive generates it, and [`Container`] is the snapshot it
//! produces.
//!
//! ```ignore
//! #[derive(FieldContainer)]
//! struct HomePage {
//!     categories: Vec<ElementHandle>,
//!     #[field(components)]
//!     product_cards: Vec<ProductCard>,
//! }
//!
//! let fields = home_page.fields();
//! let categories = fields.elements("categories")?;
//! ```

use crate::driver::ElementHandle;
use crate::result::{AcquisitionError, AcquisitionResult};
use std::fmt;

/// Current value of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single element
    Element(ElementHandle),
    /// A list of elements
    Elements(Vec<ElementHandle>),
    /// A nested component
    Component(Container),
    /// A list of components
    Components(Vec<Container>),
}

impl FieldValue {
    /// Snapshot a nested component
    #[must_use]
    pub fn component<T: FieldContainer + ?Sized>(component: &T) -> Self {
        Self::Component(component.fields())
    }

    /// Snapshot a list of components
    #[must_use]
    pub fn components<T: FieldContainer>(components: &[T]) -> Self {
        Self::Components(components.iter().map(FieldContainer::fields).collect())
    }

    /// Kind of value held, for error messages
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Element(_) => FieldKind::Element,
            Self::Elements(_) => FieldKind::Elements,
            Self::Component(_) => FieldKind::Component,
            Self::Components(_) => FieldKind::Components,
        }
    }
}

/// Kinds of field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single element
    Element,
    /// Element list
    Elements,
    /// Nested component
    Component,
    /// Component list
    Components,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Element => "element",
            Self::Elements => "element list",
            Self::Component => "component",
            Self::Components => "component list",
        })
    }
}

/// Conversion of a model field into a [`FieldValue`].
///
/// `None` means the field currently holds nothing and is left out of the
/// snapshot.
pub trait IntoFieldValue {
    /// Convert the current value
    fn field_value(&self) -> Option<FieldValue>;
}

impl IntoFieldValue for ElementHandle {
    fn field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Element(self.clone()))
    }
}

impl IntoFieldValue for Vec<ElementHandle> {
    fn field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Elements(self.clone()))
    }
}

impl IntoFieldValue for Option<ElementHandle> {
    fn field_value(&self) -> Option<FieldValue> {
        self.as_ref().map(|e| FieldValue::Element(e.clone()))
    }
}

impl IntoFieldValue for Option<Vec<ElementHandle>> {
    fn field_value(&self) -> Option<FieldValue> {
        self.as_ref().map(|e| FieldValue::Elements(e.clone()))
    }
}

/// Generic access to a model's named fields
pub trait FieldContainer {
    /// Name of the model type, for logging
    fn container_name(&self) -> &str;

    /// Enumerate every declared field with its current value
    fn fields(&self) -> Container;

    /// Current value of a single field
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields().get(name).cloned()
    }

    /// Names of all populated fields, in declaration order
    fn field_names(&self) -> Vec<String> {
        self.fields().names().map(str::to_string).collect()
    }
}

/// Snapshot of a page or component: ordered named fields plus an optional
/// root element (the component's own node).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    name: String,
    root: Option<ElementHandle>,
    fields: Vec<(String, FieldValue)>,
}

impl Container {
    /// Create an empty container
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            fields: Vec::new(),
        }
    }

    /// Insert or replace a field
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Insert a field when the conversion produced a value
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Set the root element
    pub fn set_root(&mut self, root: ElementHandle) {
        self.root = Some(root);
    }

    /// Builder: add an element field
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>, element: ElementHandle) -> Self {
        self.insert(name, FieldValue::Element(element));
        self
    }

    /// Builder: add an element list field
    #[must_use]
    pub fn with_elements(mut self, name: impl Into<String>, elements: Vec<ElementHandle>) -> Self {
        self.insert(name, FieldValue::Elements(elements));
        self
    }

    /// Builder: add a nested component
    #[must_use]
    pub fn with_component(mut self, name: impl Into<String>, component: Container) -> Self {
        self.insert(name, FieldValue::Component(component));
        self
    }

    /// Builder: add a component list
    #[must_use]
    pub fn with_components(mut self, name: impl Into<String>, components: Vec<Container>) -> Self {
        self.insert(name, FieldValue::Components(components));
        self
    }

    /// Builder: set the root element
    #[must_use]
    pub fn with_root(mut self, root: ElementHandle) -> Self {
        self.root = Some(root);
        self
    }

    /// Model name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root element, if the model declares one
    #[must_use]
    pub const fn root(&self) -> Option<&ElementHandle> {
        self.root.as_ref()
    }

    /// Raw field lookup
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Number of populated fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Element field; `Ok(None)` when absent
    pub fn element(&self, name: &str) -> AcquisitionResult<Option<ElementHandle>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Element(e)) => Ok(Some(e.clone())),
            Some(other) => Err(self.kind_mismatch(name, FieldKind::Element, other)),
        }
    }

    /// Element list field; `Ok(None)` when absent
    pub fn elements(&self, name: &str) -> AcquisitionResult<Option<Vec<ElementHandle>>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Elements(e)) => Ok(Some(e.clone())),
            Some(other) => Err(self.kind_mismatch(name, FieldKind::Elements, other)),
        }
    }

    /// Nested component field; `Ok(None)` when absent
    pub fn component(&self, name: &str) -> AcquisitionResult<Option<Container>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Component(c)) => Ok(Some(c.clone())),
            Some(other) => Err(self.kind_mismatch(name, FieldKind::Component, other)),
        }
    }

    /// Component list field; `Ok(None)` when absent
    pub fn components(&self, name: &str) -> AcquisitionResult<Option<Vec<Container>>> {
        match self.get(name) {
            None => Ok(None),
            Some(FieldValue::Components(c)) => Ok(Some(c.clone())),
            Some(other) => Err(self.kind_mismatch(name, FieldKind::Components, other)),
        }
    }

    fn kind_mismatch(&self, name: &str, expected: FieldKind, found: &FieldValue) -> AcquisitionError {
        AcquisitionError::configuration(format!(
            "field '{name}' of {} is a {}, not a {expected}",
            self.name,
            found.kind()
        ))
    }
}

impl FieldContainer for Container {
    fn container_name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Container {
        self.clone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

/// Enumerate every field of an instance
pub fn fields<T: FieldContainer + ?Sized>(instance: &T) -> Container {
    instance.fields()
}

/// Resolve one field of an instance by name
pub fn field_value<T: FieldContainer + ?Sized>(name: &str, instance: &T) -> Option<FieldValue> {
    instance.field(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockElement;
    use crate::result::ErrorClass;

    fn element(text: &str) -> ElementHandle {
        ElementHandle::new(MockElement::new(text))
    }

    fn card(title: &str) -> Container {
        Container::new("ProductCard")
            .with_root(element(title))
            .with_element("title", element(title))
    }

    mod container_tests {
        use super::*;

        #[test]
        fn test_builder_and_names_keep_order() {
            let page = Container::new("HomePage")
                .with_element("searchBar", element(""))
                .with_elements("categories", vec![element("A"), element("B")])
                .with_components("productCards", vec![card("Phone")]);

            assert_eq!(page.name(), "HomePage");
            assert_eq!(page.len(), 3);
            assert_eq!(
                page.names().collect::<Vec<_>>(),
                vec!["searchBar", "categories", "productCards"]
            );
        }

        #[test]
        fn test_insert_replaces() {
            let first = element("1");
            let second = element("2");
            let mut page = Container::new("P");
            page.insert("x", FieldValue::Element(first));
            page.insert("x", FieldValue::Element(second.clone()));
            assert_eq!(page.len(), 1);
            assert_eq!(page.element("x").unwrap(), Some(second));
        }

        #[test]
        fn test_insert_opt_skips_none() {
            let mut page = Container::new("P");
            page.insert_opt("missing", None::<ElementHandle>.field_value());
            assert!(page.is_empty());
        }

        #[test]
        fn test_typed_access() {
            let search = element("");
            let page = Container::new("HomePage")
                .with_element("searchBar", search.clone())
                .with_elements("categories", vec![element("A")])
                .with_component("header", Container::new("Header"))
                .with_components("cards", vec![card("Phone"), card("Laptop")]);

            assert_eq!(page.element("searchBar").unwrap(), Some(search));
            assert_eq!(page.elements("categories").unwrap().unwrap().len(), 1);
            assert_eq!(page.component("header").unwrap().unwrap().name(), "Header");
            assert_eq!(page.components("cards").unwrap().unwrap().len(), 2);
        }

        #[test]
        fn test_absent_field_is_none() {
            let page = Container::new("HomePage");
            assert!(page.element("nope").unwrap().is_none());
            assert!(page.elements("nope").unwrap().is_none());
            assert!(page.component("nope").unwrap().is_none());
            assert!(page.components("nope").unwrap().is_none());
        }

        #[test]
        fn test_kind_mismatch_is_configuration_error() {
            let page = Container::new("HomePage").with_elements("categories", vec![]);
            let err = page.element("categories").unwrap_err();
            assert_eq!(err.class(), ErrorClass::Configuration);
            assert!(err.to_string().contains("element list"));
        }
    }

    mod field_container_tests {
        use super::*;

        struct LoginPage {
            username: ElementHandle,
            password: Option<ElementHandle>,
            errors: Vec<ElementHandle>,
        }

        impl FieldContainer for LoginPage {
            fn container_name(&self) -> &str {
                "LoginPage"
            }

            fn fields(&self) -> Container {
                let mut container = Container::new("LoginPage");
                container.insert_opt("username", self.username.field_value());
                container.insert_opt("password", self.password.field_value());
                container.insert_opt("errors", self.errors.field_value());
                container
            }
        }

        #[test]
        fn test_hand_written_impl() {
            let page = LoginPage {
                username: element(""),
                password: None,
                errors: vec![element("Required")],
            };

            assert_eq!(page.field_names(), vec!["username", "errors"]);
            assert!(page.field("password").is_none());
            assert_eq!(
                field_value("errors", &page).map(|v| v.kind()),
                Some(FieldKind::Elements)
            );
            assert_eq!(fields(&page).len(), 2);
        }

        #[test]
        fn test_component_snapshots() {
            let nested = FieldValue::component(&card("Phone"));
            assert_eq!(nested.kind(), FieldKind::Component);

            let list = FieldValue::components(&[card("Phone"), card("Laptop")]);
            match list {
                FieldValue::Components(items) => assert_eq!(items.len(), 2),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
