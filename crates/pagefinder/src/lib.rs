//! Pagefinder: page-object element acquisition for browser UI tests.
//!
//! Test steps name things symbolically ("the Electronics entry of the
//! categories list on the HomePage"); pagefinder turns those names into live
//! element handles and tolerates the instability of rendered UIs while doing
//! so.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   PAGEFINDER Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Test step  │    │ PageObject │    │ Page       │            │
//! │   │ (names)    │───►│ Model      │───►│ Repository │──► fields  │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │ lists                                │
//! │                           ▼                                      │
//! │                     ┌────────────┐    ┌────────────┐            │
//! │                     │ Selection  │───►│ Poller     │            │
//! │                     │ Engine     │    │ (timeout)  │            │
//! │                     └────────────┘    └────────────┘            │
//! │                                                                  │
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ JSON repo  │───►│ Locator    │───►│ Driver     │            │
//! │   └────────────┘    │ (any-of)   │    │ (external) │            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pagefinder::prelude::*;
//!
//! #[derive(FieldContainer)]
//! struct HomePage {
//!     categories: Vec<ElementHandle>,
//! }
//!
//! #[derive(FieldContainer)]
//! struct Pages {
//!     #[field(component)]
//!     home_page: HomePage,
//! }
//!
//! let pom = PageObjectModel::new(PageRepository::new(build_pages), &AcquisitionConfig::default());
//! let electronics = pom.listed_element_from_page("Electronics", "categories", "HomePage")?;
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

// Generated `FieldContainer` impls refer to `::pagefinder`
extern crate self as pagefinder;

/// Page/component snapshots and structural field access
#[allow(clippy::missing_errors_doc)]
pub mod container;

/// Acquisition configuration
#[allow(clippy::missing_errors_doc)]
pub mod config;

/// Context-token substitution
pub mod context;

/// Driver capability consumed by the core
#[allow(clippy::missing_errors_doc)]
pub mod driver;

/// JSON selector repositories
#[allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
pub mod json;

/// Locators and attribute selector generation
#[allow(clippy::missing_errors_doc)]
pub mod locator;

/// In-memory driver and elements for tests
pub mod mock;

/// Normalized page and field names
pub mod names;

/// Composite acquisition API
#[allow(clippy::missing_errors_doc, clippy::too_many_arguments)]
pub mod page_object;

/// Page repository accessor
#[allow(clippy::missing_errors_doc)]
pub mod repository;

/// Selection engine
#[allow(clippy::missing_errors_doc)]
pub mod select;

/// Bounded polling
#[allow(clippy::missing_errors_doc)]
pub mod wait;

mod bundle;
mod result;

pub use bundle::{
    Bundle, Specification, ELEMENT_NAME, INPUT, INPUT_ELEMENT, SELECTOR_ELEMENT, SELECTOR_TEXT,
    TARGET_ELEMENT,
};
pub use config::{
    AcquisitionConfig, MatchMode, DEFAULT_ELEMENT_TIMEOUT_MS, DEFAULT_IMPLICIT_WAIT_MS,
};
pub use container::{field_value, fields, Container, FieldContainer, FieldKind, FieldValue, IntoFieldValue};
pub use context::{ContextResolver, ContextStore};
pub use driver::{Driver, DriverError, DriverErrorKind, ElementHandle, WebElement};
pub use json::{locator_for, ElementEntry, JsonPageObjects, ObjectRepository, PageEntry};
pub use locator::{
    generate_css_by_attributes, generate_xpath_by_attributes, selector_by_attributes, Locator,
    Selector, SelectorType,
};
pub use names::{decapitalize, FieldName, PageName};
pub use page_object::PageObjectModel;
pub use repository::PageRepository;
pub use result::{AcquisitionError, AcquisitionResult, ErrorClass};
pub use select::SelectionEngine;
pub use wait::{Outcome, Poller};

// Re-export the derive macro when the `derive` feature is enabled
#[cfg(feature = "derive")]
pub use pagefinder_derive::FieldContainer;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::bundle::*;
    pub use super::config::*;
    pub use super::container::*;
    pub use super::context::*;
    pub use super::driver::*;
    pub use super::json::*;
    pub use super::locator::*;
    pub use super::names::*;
    pub use super::page_object::*;
    pub use super::repository::*;
    pub use super::result::*;
    pub use super::select::*;
    pub use super::wait::*;
    #[cfg(feature = "derive")]
    pub use pagefinder_derive::FieldContainer;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod prelude_tests {
        use crate::prelude::*;

        #[test]
        fn test_prelude_exposes_core_types() {
            let config = AcquisitionConfig::default();
            let engine = SelectionEngine::new(&config);
            assert_eq!(engine.timeout(), config.element_timeout());
            assert_eq!(PageName::new("HomePage").as_str(), "homePage");
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_driver_error_classification() {
            let err: AcquisitionError = DriverError::stale("x").into();
            assert!(err.is_transient());
            let err: AcquisitionError =
                DriverError::new(DriverErrorKind::InvalidSelector, "bad").into();
            assert_eq!(err.class(), ErrorClass::Configuration);
        }
    }
}
