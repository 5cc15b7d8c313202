//! Page Object Model acquisition API.
//!
//! One operation per combination of container level (page, component,
//! listed component) and target (element, list, listed element, bundle).
//! Every operation is a composition of [`PageRepository`] lookups and
//! [`SelectionEngine`] selections; failures propagate unchanged.
//!
//! Every caller-supplied name passes through the [`ContextResolver`] before
//! it is normalized and resolved.
//!
//! # Example
//!
//! ```ignore
//! let pom = PageObjectModel::new(PageRepository::<Pages>::from_default(), &config);
//!
//! // "Click Electronics in the categories list on the HomePage"
//! let electronics = pom.listed_element_from_page("Electronics", "categories", "HomePage")?;
//! ```

use crate::bundle::{
    Bundle, Specification, ELEMENT_NAME, INPUT, INPUT_ELEMENT, SELECTOR_ELEMENT, SELECTOR_TEXT,
    TARGET_ELEMENT,
};
use crate::config::AcquisitionConfig;
use crate::container::{Container, FieldContainer};
use crate::context::{ContextResolver, ContextStore};
use crate::driver::ElementHandle;
use crate::names::{FieldName, PageName};
use crate::repository::PageRepository;
use crate::result::{AcquisitionError, AcquisitionResult};
use crate::select::SelectionEngine;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Composite acquisition over a typed page repository
pub struct PageObjectModel<R> {
    repository: PageRepository<R>,
    engine: SelectionEngine,
    context: Arc<dyn ContextResolver>,
}

impl<R> fmt::Debug for PageObjectModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageObjectModel")
            .field("repository", &self.repository)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<R: FieldContainer> PageObjectModel<R> {
    /// Create from a repository and configuration, with an empty context
    #[must_use]
    pub fn new(repository: PageRepository<R>, config: &AcquisitionConfig) -> Self {
        Self::with_engine(repository, SelectionEngine::new(config))
    }

    /// Create from a repository and a preconfigured engine
    #[must_use]
    pub fn with_engine(repository: PageRepository<R>, engine: SelectionEngine) -> Self {
        Self {
            repository,
            engine,
            context: Arc::new(ContextStore::new()),
        }
    }

    /// Replace the context resolver
    #[must_use]
    pub fn with_context(mut self, context: Arc<dyn ContextResolver>) -> Self {
        self.context = context;
        self
    }

    /// The underlying repository
    #[must_use]
    pub const fn repository(&self) -> &PageRepository<R> {
        &self.repository
    }

    /// The selection engine
    #[must_use]
    pub const fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    // =========================================================================
    // PAGE AND COMPONENT FIELDS
    // =========================================================================

    /// Element field of a page
    pub fn element_from_page(&self, element: &str, page: &str) -> AcquisitionResult<ElementHandle> {
        let (element, page) = (self.field(element), self.page(page));
        info!(%element, %page, "Acquiring element from page");
        required(
            self.repository.element_from_page(&element, &page)?,
            "element",
            &element,
            &page,
        )
    }

    /// Element list field of a page
    pub fn elements_from_page(
        &self,
        list: &str,
        page: &str,
    ) -> AcquisitionResult<Vec<ElementHandle>> {
        let (list, page) = (self.field(list), self.page(page));
        info!(%list, %page, "Acquiring element list from page");
        self.page_elements(&list, &page)
    }

    /// Element field of a component on a page
    pub fn element_from_component(
        &self,
        element: &str,
        component: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (element, component, page) =
            (self.field(element), self.field(component), self.page(page));
        info!(%element, %component, %page, "Acquiring element from component");
        self.component_element(&element, &component, &page)
    }

    /// Element list field of a component on a page
    pub fn elements_from_component(
        &self,
        list: &str,
        component: &str,
        page: &str,
    ) -> AcquisitionResult<Vec<ElementHandle>> {
        let (list, component, page) = (self.field(list), self.field(component), self.page(page));
        info!(%list, %component, %page, "Acquiring element list from component");
        self.component_elements(&list, &component, &page)
    }

    // =========================================================================
    // LISTED ELEMENTS AND COMPONENTS
    // =========================================================================

    /// Element named `name` out of a list on a page
    pub fn listed_element_from_page(
        &self,
        name: &str,
        list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (name, list, page) = (self.text(name), self.field(list), self.page(page));
        info!(%name, %list, %page, "Acquiring listed element from page");
        let elements = self.page_elements(&list, &page)?;
        self.engine.select_by_text(&elements, &name)
    }

    /// Element named `name` out of a list on a component
    pub fn listed_element_from_component(
        &self,
        name: &str,
        component: &str,
        list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (name, component, list, page) = (
            self.text(name),
            self.field(component),
            self.field(list),
            self.page(page),
        );
        info!(%name, %component, %list, %page, "Acquiring listed element from component");
        let elements = self.component_elements(&list, &component, &page)?;
        self.engine.select_by_text(&elements, &name)
    }

    /// Element field of the component, in a component list, whose own text
    /// matches `component_name`
    pub fn listed_component_element(
        &self,
        element: &str,
        component_name: &str,
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (element, component_name, component_list, page) = (
            self.field(element),
            self.text(component_name),
            self.field(component_list),
            self.page(page),
        );
        info!(%element, %component_name, %component_list, %page, "Acquiring listed component element");
        let components = self.page_components(&component_list, &page)?;
        let component = self.engine.select_component_by_text(&components, &component_name)?;
        element_of(&element, &component)
    }

    /// Component, in a component list, whose `element_field` child reads `text`
    pub fn exact_named_listed_component(
        &self,
        element_field: &str,
        text: &str,
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<Container> {
        let (element_field, text, component_list, page) = (
            self.field(element_field),
            self.text(text),
            self.field(component_list),
            self.page(page),
        );
        info!(%element_field, %text, %component_list, %page, "Acquiring exact named component");
        let components = self.page_components(&component_list, &page)?;
        self.engine
            .select_component_by_child_text(&components, &text, &element_field)
    }

    /// `target` element of the component whose `element_field` child reads
    /// `text`
    pub fn exact_named_listed_component_element(
        &self,
        target: &str,
        element_field: &str,
        text: &str,
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let component = self.exact_named_listed_component(element_field, text, component_list, page)?;
        element_of(&self.field(target), &component)
    }

    /// Element named `name` out of `element_list` of the component whose own
    /// text matches `component_name`
    pub fn listed_element_amongst_listed_components(
        &self,
        name: &str,
        element_list: &str,
        component_name: &str,
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (name, element_list, component_name, component_list, page) = (
            self.text(name),
            self.field(element_list),
            self.text(component_name),
            self.field(component_list),
            self.page(page),
        );
        info!(
            %name, %element_list, %component_name, %component_list, %page,
            "Acquiring listed element amongst listed components"
        );
        let components = self.page_components(&component_list, &page)?;
        let component = self.engine.select_component_by_text(&components, &component_name)?;
        let elements = elements_of(&element_list, &component)?;
        self.engine.select_by_text(&elements, &name)
    }

    // =========================================================================
    // ATTRIBUTE SELECTION
    // =========================================================================

    /// Element of a page list whose `attribute` matches `value`
    pub fn listed_element_by_attribute(
        &self,
        attribute: &str,
        value: &str,
        list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (attribute, value, list, page) = (
            self.text(attribute),
            self.text(value),
            self.field(list),
            self.page(page),
        );
        info!(%attribute, %value, %list, %page, "Acquiring listed element by attribute");
        let elements = self.page_elements(&list, &page)?;
        self.engine.select_by_attribute(&elements, &attribute, &value)
    }

    /// Element of a component list whose `attribute` matches `value`
    pub fn listed_component_element_by_attribute(
        &self,
        component: &str,
        value: &str,
        attribute: &str,
        list: &str,
        page: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let (component, value, attribute, list, page) = (
            self.field(component),
            self.text(value),
            self.text(attribute),
            self.field(list),
            self.page(page),
        );
        info!(%attribute, %value, %list, %component, %page, "Acquiring listed component element by attribute");
        let elements = self.component_elements(&list, &component, &page)?;
        self.engine.select_by_attribute(&elements, &attribute, &value)
    }

    /// Component of a component list whose `child_field` carries `attribute`
    /// matching `value`
    pub fn listed_component_by_child_attribute(
        &self,
        child_field: &str,
        attribute: &str,
        value: &str,
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<Container> {
        let (child_field, attribute, value, component_list, page) = (
            self.field(child_field),
            self.text(attribute),
            self.text(value),
            self.field(component_list),
            self.page(page),
        );
        info!(%child_field, %attribute, %value, %component_list, %page, "Acquiring listed component by child attribute");
        let components = self.page_components(&component_list, &page)?;
        self.engine
            .select_component_by_child_attribute(&components, &attribute, &value, &child_field)
    }

    // =========================================================================
    // BUNDLES
    // =========================================================================

    /// Element field of a page, bundled with the row that requested it
    pub fn element_bundle_from_page(
        &self,
        element: &str,
        page: &str,
        specification: &Specification,
    ) -> AcquisitionResult<Bundle> {
        let handle = self.element_from_page(element, page)?;
        Ok(Bundle::new(self.text(element), handle, specification.clone()))
    }

    /// One bundle per row, each naming its element under `Element Name`.
    /// The first unresolvable row fails the whole call.
    pub fn element_bundles_from_page(
        &self,
        page: &str,
        specifications: &[Specification],
    ) -> AcquisitionResult<Vec<Bundle>> {
        info!(page, rows = specifications.len(), "Acquiring element bundles from page");
        specifications
            .iter()
            .map(|row| self.element_bundle_from_page(row.require(ELEMENT_NAME)?, page, row))
            .collect()
    }

    /// Element of a component, named by the row's `Element Name`
    pub fn element_bundle_from_component(
        &self,
        component: &str,
        page: &str,
        specification: &Specification,
    ) -> AcquisitionResult<Bundle> {
        let element = specification.require(ELEMENT_NAME)?;
        let handle = self.element_from_component(element, component, page)?;
        Ok(Bundle::new(self.text(element), handle, specification.clone()))
    }

    /// One component bundle per row; fail-fast
    pub fn element_bundles_from_component(
        &self,
        component: &str,
        page: &str,
        specifications: &[Specification],
    ) -> AcquisitionResult<Vec<Bundle>> {
        info!(component, page, rows = specifications.len(), "Acquiring element bundles from component");
        specifications
            .iter()
            .map(|row| self.element_bundle_from_component(component, page, row))
            .collect()
    }

    /// Form inputs of a page.
    ///
    /// Each row names the field under `Input Element` and the value to enter
    /// under `Input`; the value is context-resolved in the returned metadata.
    pub fn input_bundles_from_page(
        &self,
        forms: &[Specification],
        page: &str,
    ) -> AcquisitionResult<Vec<Bundle>> {
        info!(page, rows = forms.len(), "Acquiring form inputs from page");
        forms
            .iter()
            .map(|form| {
                let (input_element, metadata) = self.input_row(form)?;
                let handle = self.element_from_page(input_element, page)?;
                Ok(Bundle::new(self.text(input_element), handle, metadata))
            })
            .collect()
    }

    /// Form inputs of a component; see [`PageObjectModel::input_bundles_from_page`]
    pub fn input_bundles_from_component(
        &self,
        forms: &[Specification],
        component: &str,
        page: &str,
    ) -> AcquisitionResult<Vec<Bundle>> {
        info!(component, page, rows = forms.len(), "Acquiring form inputs from component");
        forms
            .iter()
            .map(|form| {
                let (input_element, metadata) = self.input_row(form)?;
                let handle = self.element_from_component(input_element, component, page)?;
                Ok(Bundle::new(self.text(input_element), handle, metadata))
            })
            .collect()
    }

    /// `Target Element` of the component whose `Selector Element` child reads
    /// `Selector Text`
    pub fn child_element_by_second_child_text(
        &self,
        specification: &Specification,
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<Bundle> {
        let selector_text = specification.require(SELECTOR_TEXT)?;
        let selector_element = specification.require(SELECTOR_ELEMENT)?;
        let target = self.text(specification.require(TARGET_ELEMENT)?);
        let component =
            self.exact_named_listed_component(selector_element, selector_text, component_list, page)?;
        let handle = element_of(&FieldName::new(&target), &component)?;
        Ok(Bundle::new(target, handle, specification.clone()))
    }

    /// One second-child-text bundle per row; fail-fast
    pub fn child_elements_by_second_child_text(
        &self,
        specifications: &[Specification],
        component_list: &str,
        page: &str,
    ) -> AcquisitionResult<Vec<Bundle>> {
        info!(component_list, page, rows = specifications.len(), "Acquiring child element bundles");
        specifications
            .iter()
            .map(|row| self.child_element_by_second_child_text(row, component_list, page))
            .collect()
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn text(&self, raw: &str) -> String {
        self.context.resolve(raw)
    }

    fn field(&self, raw: &str) -> FieldName {
        FieldName::new(&self.context.resolve(raw))
    }

    fn page(&self, raw: &str) -> PageName {
        PageName::new(&self.context.resolve(raw))
    }

    fn input_row<'s>(&self, form: &'s Specification) -> AcquisitionResult<(&'s str, Specification)> {
        let input_element = form.require(INPUT_ELEMENT)?;
        let input = self.text(form.require(INPUT)?);
        let mut metadata = form.clone();
        metadata.insert(INPUT, input);
        Ok((input_element, metadata))
    }

    fn page_elements(&self, list: &FieldName, page: &PageName) -> AcquisitionResult<Vec<ElementHandle>> {
        required(self.repository.elements_from_page(list, page)?, "element list", list, page)
    }

    fn page_components(&self, list: &FieldName, page: &PageName) -> AcquisitionResult<Vec<Container>> {
        required(self.repository.components_from_page(list, page)?, "component list", list, page)
    }

    fn page_component(&self, component: &FieldName, page: &PageName) -> AcquisitionResult<Container> {
        required(
            self.repository.component_from_page(component, page)?,
            "component",
            component,
            page,
        )
    }

    fn component_element(
        &self,
        element: &FieldName,
        component: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<ElementHandle> {
        element_of(element, &self.page_component(component, page)?)
    }

    fn component_elements(
        &self,
        list: &FieldName,
        component: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Vec<ElementHandle>> {
        elements_of(list, &self.page_component(component, page)?)
    }
}

fn required<T>(
    value: Option<T>,
    kind: &str,
    name: &FieldName,
    owner: &impl fmt::Display,
) -> AcquisitionResult<T> {
    value.ok_or_else(|| AcquisitionError::not_found(format!("{kind} field on {owner}"), name.as_str()))
}

fn element_of(element: &FieldName, component: &Container) -> AcquisitionResult<ElementHandle> {
    required(component.element(element.as_str())?, "element", element, &component.name())
}

fn elements_of(list: &FieldName, component: &Container) -> AcquisitionResult<Vec<ElementHandle>> {
    required(component.elements(list.as_str())?, "element list", list, &component.name())
}
