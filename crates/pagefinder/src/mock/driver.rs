//! In-memory driver

use crate::config::DEFAULT_IMPLICIT_WAIT_MS;
use crate::driver::{Driver, DriverError, DriverErrorKind, ElementHandle};
use crate::locator::{Locator, Selector};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug)]
struct DriverState {
    registered: Vec<(Selector, Vec<ElementHandle>)>,
    implicit_wait: Duration,
    implicit_wait_history: Vec<Duration>,
    queries: Vec<Locator>,
}

/// Driver answering locator queries from registered elements
#[derive(Debug)]
pub struct MockDriver {
    state: Mutex<DriverState>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create a driver with nothing registered
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DriverState {
                registered: Vec::new(),
                implicit_wait: Duration::from_millis(DEFAULT_IMPLICIT_WAIT_MS),
                implicit_wait_history: Vec::new(),
                queries: Vec::new(),
            }),
        }
    }

    /// Make `element` discoverable through `selector`, after any element
    /// already registered for it
    pub fn register(&self, selector: Selector, element: ElementHandle) {
        let mut state = self.lock();
        match state.registered.iter_mut().find(|(s, _)| *s == selector) {
            Some((_, elements)) => elements.push(element),
            None => state.registered.push((selector, vec![element])),
        }
    }

    /// Builder-style [`MockDriver::register`]
    #[must_use]
    pub fn with_element(self, selector: Selector, element: ElementHandle) -> Self {
        self.register(selector, element);
        self
    }

    /// Every implicit wait set so far, oldest first
    #[must_use]
    pub fn implicit_wait_history(&self) -> Vec<Duration> {
        self.lock().implicit_wait_history.clone()
    }

    /// Every locator queried so far, oldest first
    #[must_use]
    pub fn queries(&self) -> Vec<Locator> {
        self.lock().queries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn matching(&self, locator: &Locator) -> Result<Vec<ElementHandle>, DriverError> {
        if locator.is_empty() {
            return Err(DriverError::new(
                DriverErrorKind::InvalidSelector,
                "locator declares no selector",
            ));
        }
        let mut state = self.lock();
        state.queries.push(locator.clone());

        let mut found: Vec<ElementHandle> = Vec::new();
        for selector in locator.selectors() {
            let Some((_, elements)) = state.registered.iter().find(|(s, _)| s == selector) else {
                continue;
            };
            for element in elements {
                if !found.iter().any(|e| e.same_as(element)) {
                    found.push(element.clone());
                }
            }
        }
        Ok(found)
    }
}

impl Driver for MockDriver {
    fn find_element(&self, locator: &Locator) -> Result<ElementHandle, DriverError> {
        self.matching(locator)?.into_iter().next().ok_or_else(|| {
            DriverError::no_such_element(format!("Cannot locate an element using {locator}"))
        })
    }

    fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>, DriverError> {
        self.matching(locator)
    }

    fn implicit_wait(&self) -> Duration {
        self.lock().implicit_wait
    }

    fn set_implicit_wait(&self, wait: Duration) {
        let mut state = self.lock();
        state.implicit_wait = wait;
        state.implicit_wait_history.push(wait);
    }
}
