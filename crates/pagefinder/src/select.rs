//! Named and attribute selection over candidate lists.
//!
//! Every selection runs on a [`Poller`], so all variants share one timeout,
//! the first-match-wins order and the same tolerance for transient reads.
//! A null attribute is never a match and never an error.

use crate::config::{AcquisitionConfig, MatchMode};
use crate::container::Container;
use crate::driver::{Driver, ElementHandle};
use crate::names::FieldName;
use crate::result::{AcquisitionError, AcquisitionResult};
use crate::wait::{Outcome, Poller};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Selects one element or component out of a candidate list
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    poller: Poller,
    match_mode: MatchMode,
}

impl SelectionEngine {
    /// Create an engine from configuration
    #[must_use]
    pub const fn new(config: &AcquisitionConfig) -> Self {
        Self {
            poller: Poller::from_config(config),
            match_mode: config.match_mode,
        }
    }

    /// Override the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.poller = self.poller.with_timeout(timeout);
        self
    }

    /// Override the match mode
    #[must_use]
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Attach a driver so its implicit wait is re-asserted while polling
    #[must_use]
    pub fn with_driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.poller = self.poller.with_driver(driver);
        self
    }

    /// Selection timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.poller.timeout()
    }

    /// Match mode
    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Select the first element whose text matches `text`
    #[instrument(level = "debug", skip(self, candidates), fields(count = candidates.len()))]
    pub fn select_by_text(
        &self,
        candidates: &[ElementHandle],
        text: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let mode = self.match_mode;
        self.poller.poll("element", text, candidates, |candidate| {
            match candidate.text() {
                Ok(observed) => Outcome::when(mode.text_matches(&observed, text), || {
                    candidate.clone()
                }),
                Err(err) => Outcome::from_driver_error(err),
            }
        })
    }

    /// Select the first element whose `attribute` matches `value`
    #[instrument(level = "debug", skip(self, candidates), fields(count = candidates.len()))]
    pub fn select_by_attribute(
        &self,
        candidates: &[ElementHandle],
        attribute: &str,
        value: &str,
    ) -> AcquisitionResult<ElementHandle> {
        let mode = self.match_mode;
        let key = format!("element with {attribute} attribute");
        self.poller.poll(&key, value, candidates, |candidate| {
            attribute_outcome(candidate, attribute, value, mode, || candidate.clone())
        })
    }

    /// Select the first component whose own root text matches `text`
    #[instrument(level = "debug", skip(self, components), fields(count = components.len()))]
    pub fn select_component_by_text(
        &self,
        components: &[Container],
        text: &str,
    ) -> AcquisitionResult<Container> {
        let mode = self.match_mode;
        self.poller.poll("component", text, components, |component| {
            let Some(root) = component.root() else {
                return Outcome::Failed(AcquisitionError::configuration(format!(
                    "component {} declares no root element to read its text from",
                    component.name()
                )));
            };
            match root.text() {
                Ok(observed) => Outcome::when(mode.text_matches(&observed, text), || {
                    component.clone()
                }),
                Err(err) => Outcome::from_driver_error(err),
            }
        })
    }

    /// Select the first component whose `child` element text or accessible
    /// name matches `text`
    #[instrument(level = "debug", skip(self, components), fields(count = components.len()))]
    pub fn select_component_by_child_text(
        &self,
        components: &[Container],
        text: &str,
        child: &FieldName,
    ) -> AcquisitionResult<Container> {
        let mode = self.match_mode;
        self.poller.poll("component", text, components, |component| {
            let element = match child_element(component, child) {
                Ok(element) => element,
                Err(err) => return Outcome::Failed(err),
            };
            match element.text() {
                Ok(observed) if mode.text_matches(&observed, text) => {
                    return Outcome::Matched(component.clone());
                }
                Ok(_) => {}
                Err(err) => return Outcome::from_driver_error(err),
            }
            match element.accessible_name() {
                Ok(observed) => Outcome::when(mode.text_matches(&observed, text), || {
                    component.clone()
                }),
                Err(err) => Outcome::from_driver_error(err),
            }
        })
    }

    /// Select the first component whose `child` element carries `attribute`
    /// matching `value`
    #[instrument(level = "debug", skip(self, components), fields(count = components.len()))]
    pub fn select_component_by_child_attribute(
        &self,
        components: &[Container],
        attribute: &str,
        value: &str,
        child: &FieldName,
    ) -> AcquisitionResult<Container> {
        let mode = self.match_mode;
        let key = format!("component with {attribute} attribute on {child}");
        self.poller.poll(&key, value, components, |component| {
            match child_element(component, child) {
                Ok(element) => {
                    attribute_outcome(&element, attribute, value, mode, || component.clone())
                }
                Err(err) => Outcome::Failed(err),
            }
        })
    }
}

fn attribute_outcome<T>(
    element: &ElementHandle,
    attribute: &str,
    value: &str,
    mode: MatchMode,
    found: impl FnOnce() -> T,
) -> Outcome<T> {
    match element.attribute(attribute) {
        Ok(Some(observed)) => Outcome::when(mode.attribute_matches(&observed, value), found),
        Ok(None) => Outcome::NotYetMatched(None),
        Err(err) => Outcome::from_driver_error(err),
    }
}

fn child_element(component: &Container, child: &FieldName) -> AcquisitionResult<ElementHandle> {
    component.element(child.as_str())?.ok_or_else(|| {
        debug!(component = component.name(), child = %child, "child field missing");
        AcquisitionError::not_found(format!("field on {}", component.name()), child.as_str())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{DriverError, DriverErrorKind};
    use crate::mock::{MockDriver, MockElement};
    use crate::result::ErrorClass;
    use proptest::prelude::*;
    use std::time::Instant;

    fn engine() -> SelectionEngine {
        SelectionEngine::default().with_timeout(Duration::from_millis(80))
    }

    fn handles(texts: &[&str]) -> Vec<ElementHandle> {
        texts.iter().map(|t| MockElement::new(*t).handle()).collect()
    }

    fn card(title: &str, sku: Option<&str>) -> Container {
        let mut title_element = MockElement::new(title);
        if let Some(sku) = sku {
            title_element = title_element.with_attribute("data-sku", sku);
        }
        Container::new("ProductCard")
            .with_root(MockElement::new(format!("{title} $10")).handle())
            .with_element("title", title_element.handle())
    }

    mod by_text_tests {
        use super::*;

        #[test]
        fn test_selects_exact_and_substring() {
            let candidates = handles(&["Books", "Home", "Electronics", "Toys", "Garden"]);
            let found = engine().select_by_text(&candidates, "Electronics").unwrap();
            assert_eq!(found, candidates[2]);

            let candidates = handles(&["Submit Order"]);
            assert!(engine().select_by_text(&candidates, "submit").is_ok());
        }

        #[test]
        fn test_superstring_does_not_match() {
            let candidates = handles(&["Submit Order"]);
            let err = engine()
                .select_by_text(&candidates, "order submit")
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::NotFound);
        }

        #[test]
        fn test_strict_mode_rejects_substring() {
            let candidates = handles(&["Reorder", "Order"]);
            let found = engine()
                .with_match_mode(MatchMode::Strict)
                .select_by_text(&candidates, "order")
                .unwrap();
            assert_eq!(found, candidates[1]);
        }

        #[test]
        fn test_first_match_stops_scanning() {
            let first = MockElement::new("Laptops");
            let second = MockElement::new("Laptops");
            let candidates = vec![first.handle(), second.handle()];
            engine().select_by_text(&candidates, "laptops").unwrap();
            assert_eq!(first.reads(), 1);
            assert_eq!(second.reads(), 0);
        }

        #[test]
        fn test_survives_stale_reads() {
            let flaky = MockElement::new("Electronics").with_failures(3, DriverError::stale("re-render"));
            let candidates = vec![MockElement::new("Books").handle(), flaky.handle()];
            let found = engine().select_by_text(&candidates, "Electronics").unwrap();
            assert_eq!(found, candidates[1]);
        }

        #[test]
        fn test_text_change_mid_poll() {
            let loading = MockElement::new("Loading...");
            let candidates = vec![loading.handle()];
            let engine = SelectionEngine::default().with_timeout(Duration::from_secs(2));

            let updater = {
                let loading = loading.clone();
                std::thread::spawn(move || {
                    std::thread::sleep(Duration::from_millis(20));
                    loading.set_text("Electronics");
                })
            };
            let found = engine.select_by_text(&candidates, "Electronics").unwrap();
            updater.join().unwrap();
            assert_eq!(found, candidates[0]);
        }

        #[test]
        fn test_persistent_error_aborts() {
            let broken = MockElement::new("x")
                .with_persistent_failure(DriverError::new(DriverErrorKind::SessionClosed, "gone"));
            let candidates = vec![broken.handle()];
            let start = Instant::now();
            let err = SelectionEngine::default()
                .select_by_text(&candidates, "x")
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::Driver);
            assert!(start.elapsed() < Duration::from_secs(1));
        }

        #[test]
        fn test_reasserts_implicit_wait_with_driver() {
            let driver = Arc::new(MockDriver::new());
            let flaky = MockElement::new("Cart").with_failures(1, DriverError::stale("x"));
            let config = AcquisitionConfig::new().with_implicit_wait(3);
            let engine = SelectionEngine::new(&config)
                .with_timeout(Duration::from_millis(200))
                .with_driver(driver.clone());

            engine.select_by_text(&[flaky.handle()], "Cart").unwrap();
            assert_eq!(driver.implicit_wait_history(), vec![Duration::from_millis(3)]);
        }
    }

    mod by_attribute_tests {
        use super::*;

        #[test]
        fn test_exact_attribute() {
            let candidates = vec![
                MockElement::new("a").with_attribute("data-id", "41").handle(),
                MockElement::new("b").with_attribute("data-id", "42").handle(),
            ];
            let found = engine()
                .select_by_attribute(&candidates, "data-id", "42")
                .unwrap();
            assert_eq!(found, candidates[1]);
        }

        #[test]
        fn test_null_attribute_is_skipped() {
            let candidates = vec![
                MockElement::new("no attribute").handle(),
                MockElement::new("b").with_attribute("type", "submit").handle(),
            ];
            let found = engine()
                .select_by_attribute(&candidates, "type", "submit")
                .unwrap();
            assert_eq!(found, candidates[1]);
        }

        #[test]
        fn test_all_null_times_out_as_not_found() {
            let candidates = handles(&["a", "b"]);
            let err = engine()
                .select_by_attribute(&candidates, "type", "submit")
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::NotFound);
            assert!(err.to_string().contains("type attribute"));
        }
    }

    mod component_tests {
        use super::*;

        #[test]
        fn test_component_by_root_text() {
            let cards = vec![card("Phone", None), card("Laptop", None)];
            let found = engine().select_component_by_text(&cards, "laptop").unwrap();
            assert_eq!(found, cards[1]);
        }

        #[test]
        fn test_component_without_root_is_configuration_error() {
            let cards = vec![Container::new("Rootless")];
            let err = engine()
                .select_component_by_text(&cards, "anything")
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::Configuration);
        }

        #[test]
        fn test_component_by_child_text() {
            let cards = vec![card("Phone", None), card("Laptop", None)];
            let found = engine()
                .select_component_by_child_text(&cards, "Laptop", &FieldName::new("Title"))
                .unwrap();
            assert_eq!(found, cards[1]);
        }

        #[test]
        fn test_component_by_child_accessible_name() {
            let labelled = Container::new("IconButton").with_element(
                "icon",
                MockElement::new("").with_accessible_name("Close dialog").handle(),
            );
            let found = engine()
                .select_component_by_child_text(&[labelled.clone()], "close dialog", &FieldName::new("icon"))
                .unwrap();
            assert_eq!(found, labelled);
        }

        #[test]
        fn test_missing_child_field_aborts() {
            let cards = vec![card("Phone", None)];
            let err = engine()
                .select_component_by_child_text(&cards, "Phone", &FieldName::new("subtitle"))
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::NotFound);
            assert!(err.to_string().contains("subtitle"));
        }

        #[test]
        fn test_component_by_child_attribute_returns_whole_component() {
            let cards = vec![card("Phone", None), card("Laptop", Some("LP-1"))];
            let found = engine()
                .select_component_by_child_attribute(&cards, "data-sku", "LP-1", &FieldName::new("title"))
                .unwrap();
            assert_eq!(found, cards[1]);
            assert!(found.element("title").unwrap().is_some());
        }

        #[test]
        fn test_component_child_null_attribute_never_raises() {
            let cards = vec![card("Phone", None)];
            let err = engine()
                .select_component_by_child_attribute(&cards, "data-sku", "LP-1", &FieldName::new("title"))
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::NotFound);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_listed_text_found_at_its_index(
            texts in proptest::collection::vec("[a-z]{3,8}", 1..8),
            seed in 0usize..8,
        ) {
            let index = seed % texts.len();
            let target = format!("TARGET-{index}");
            let mut labels = texts.clone();
            labels[index] = target.clone();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let candidates = handles(&refs);
            let found = engine().select_by_text(&candidates, &target).unwrap();
            prop_assert_eq!(found, candidates[index].clone());
        }
    }
}
