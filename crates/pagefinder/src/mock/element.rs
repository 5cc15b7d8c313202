//! Scriptable element

use crate::driver::{DriverError, ElementHandle, WebElement};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ElementState {
    text: String,
    accessible_name: Option<String>,
    attributes: HashMap<String, String>,
    failures: VecDeque<DriverError>,
    persistent_failure: Option<DriverError>,
}

/// In-memory element.
///
/// Clones share state, so a test can keep one clone and mutate the element
/// after handing a handle to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    state: Arc<Mutex<ElementState>>,
    reads: Arc<AtomicUsize>,
}

impl MockElement {
    /// Create an element with the given rendered text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let element = Self::default();
        element.lock().text = text.into();
        element
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().attributes.insert(name.into(), value.into());
        self
    }

    /// Set the accessible name (defaults to the text)
    #[must_use]
    pub fn with_accessible_name(self, name: impl Into<String>) -> Self {
        self.lock().accessible_name = Some(name.into());
        self
    }

    /// Fail the next `count` reads with `error`
    #[must_use]
    pub fn with_failures(self, count: usize, error: DriverError) -> Self {
        self.lock()
            .failures
            .extend(std::iter::repeat(error).take(count));
        self
    }

    /// Fail every read with `error`
    #[must_use]
    pub fn with_persistent_failure(self, error: DriverError) -> Self {
        self.lock().persistent_failure = Some(error);
        self
    }

    /// Replace the rendered text
    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().text = text.into();
    }

    /// Number of reads served so far, failed ones included
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Wrap in a fresh driver handle
    #[must_use]
    pub fn handle(&self) -> ElementHandle {
        ElementHandle::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, f: impl FnOnce(&ElementState) -> T) -> Result<T, DriverError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        if let Some(err) = &state.persistent_failure {
            return Err(err.clone());
        }
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        Ok(f(&state))
    }
}

impl WebElement for MockElement {
    fn attribute(&self, name: &str) -> Result<Option<String>, DriverError> {
        self.read(|s| s.attributes.get(name).cloned())
    }

    fn text(&self) -> Result<String, DriverError> {
        self.read(|s| s.text.clone())
    }

    fn accessible_name(&self) -> Result<String, DriverError> {
        self.read(|s| s.accessible_name.clone().unwrap_or_else(|| s.text.clone()))
    }
}
