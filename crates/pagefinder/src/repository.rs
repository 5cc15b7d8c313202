//! Page repository accessor.
//!
//! The repository is a container whose fields are pages. It is built from a
//! factory on every call, so each lookup observes the freshest element
//! handles the page models hold.

use crate::container::{Container, FieldContainer, FieldValue};
use crate::driver::ElementHandle;
use crate::names::{FieldName, PageName};
use crate::result::{AcquisitionError, AcquisitionResult};
use std::fmt;
use tracing::debug;

type Factory<R> = Box<dyn Fn() -> R + Send + Sync>;

/// Resolves pages, and fields on pages and components, by name
pub struct PageRepository<R> {
    factory: Factory<R>,
}

impl<R> fmt::Debug for PageRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRepository")
            .field("repository", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: FieldContainer + Default + 'static> PageRepository<R> {
    /// Build the repository with `R::default()`
    #[must_use]
    pub fn from_default() -> Self {
        Self::new(R::default)
    }
}

impl<R: FieldContainer> PageRepository<R> {
    /// Build the repository with `factory` on every call
    #[must_use]
    pub fn new(factory: impl Fn() -> R + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
        }
    }

    /// Names of the pages the repository declares
    #[must_use]
    pub fn page_names(&self) -> Vec<String> {
        (self.factory)().field_names()
    }

    /// Resolve a page.
    ///
    /// Fails with `MissingPage` when the repository has no such field and
    /// with a configuration error when the field is not a page.
    pub fn page(&self, page: &PageName) -> AcquisitionResult<Container> {
        let repository = (self.factory)();
        debug!(repository = repository.container_name(), page = %page, "resolving page");
        match repository.field(page.as_str()) {
            Some(FieldValue::Component(container)) => Ok(container),
            Some(other) => Err(AcquisitionError::configuration(format!(
                "field '{page}' of {} is a {}, not a page",
                repository.container_name(),
                other.kind()
            ))),
            None => Err(AcquisitionError::MissingPage {
                page: page.to_string(),
            }),
        }
    }

    /// Element field of a page
    pub fn element_from_page(
        &self,
        element: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Option<ElementHandle>> {
        self.page(page)?.element(element.as_str())
    }

    /// Element list field of a page
    pub fn elements_from_page(
        &self,
        list: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Option<Vec<ElementHandle>>> {
        self.page(page)?.elements(list.as_str())
    }

    /// Component list field of a page
    pub fn components_from_page(
        &self,
        list: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Option<Vec<Container>>> {
        self.page(page)?.components(list.as_str())
    }

    /// Component field of a page
    pub fn component_from_page(
        &self,
        component: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Option<Container>> {
        self.page(page)?.component(component.as_str())
    }

    /// Element field of a component on a page
    pub fn element_from_component(
        &self,
        element: &FieldName,
        component: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Option<ElementHandle>> {
        match self.component_from_page(component, page)? {
            Some(component) => Self::element_in(element, &component),
            None => Ok(None),
        }
    }

    /// Element list field of a component on a page
    pub fn elements_from_component(
        &self,
        list: &FieldName,
        component: &FieldName,
        page: &PageName,
    ) -> AcquisitionResult<Option<Vec<ElementHandle>>> {
        match self.component_from_page(component, page)? {
            Some(component) => Self::elements_in(list, &component),
            None => Ok(None),
        }
    }

    /// Element field of an already resolved component
    pub fn element_in(
        element: &FieldName,
        component: &Container,
    ) -> AcquisitionResult<Option<ElementHandle>> {
        component.element(element.as_str())
    }

    /// Element list field of an already resolved component
    pub fn elements_in(
        list: &FieldName,
        component: &Container,
    ) -> AcquisitionResult<Option<Vec<ElementHandle>>> {
        component.elements(list.as_str())
    }
}
