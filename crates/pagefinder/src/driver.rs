//! Driver capability consumed by the acquisition core.
//!
//! The browser driver and its session are owned elsewhere. Everything here is
//! the narrow surface the core needs: locate elements, read from them, and
//! re-assert the implicit wait while a poll is running.
//!
//! ```text
//! ┌──────────────────────┐     find_element(s)     ┌──────────────────────┐
//! │  JsonPageObjects     │ ──────────────────────► │  Driver (external)   │
//! └──────────────────────┘                         └──────────────────────┘
//! ┌──────────────────────┐     text / attribute    ┌──────────────────────┐
//! │  SelectionEngine     │ ──────────────────────► │  WebElement handles  │
//! └──────────────────────┘                         └──────────────────────┘
//! ```

use crate::locator::Locator;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Kind of failure reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverErrorKind {
    /// No element matched the locator
    NoSuchElement,
    /// The handle refers to a node that was re-rendered
    StaleElement,
    /// The node exists but cannot be interacted with yet
    NotInteractable,
    /// The node is not attached to the document
    Detached,
    /// The driver call itself timed out
    Timeout,
    /// The blocked driver call was interrupted
    Interrupted,
    /// The locator could not be parsed by the browser
    InvalidSelector,
    /// The session is gone
    SessionClosed,
    /// Anything else
    Unknown,
}

impl DriverErrorKind {
    /// Whether a later read of the same candidate can succeed
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            Self::NoSuchElement
                | Self::StaleElement
                | Self::NotInteractable
                | Self::Detached
                | Self::Timeout
                | Self::Interrupted
        )
    }

    /// Stable name used in log lines
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSuchElement => "no-such-element",
            Self::StaleElement => "stale-element",
            Self::NotInteractable => "not-interactable",
            Self::Detached => "detached",
            Self::Timeout => "timeout",
            Self::Interrupted => "interrupted",
            Self::InvalidSelector => "invalid-selector",
            Self::SessionClosed => "session-closed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DriverErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a driver call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DriverError {
    kind: DriverErrorKind,
    message: String,
}

impl DriverError {
    /// Create a new driver error
    #[must_use]
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Stale handle
    #[must_use]
    pub fn stale(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::StaleElement, message)
    }

    /// Detached node
    #[must_use]
    pub fn detached(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Detached, message)
    }

    /// Nothing matched
    #[must_use]
    pub fn no_such_element(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::NoSuchElement, message)
    }

    /// Failure kind
    #[must_use]
    pub const fn kind(&self) -> DriverErrorKind {
        self.kind
    }

    /// Driver message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a later read can succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

/// Introspection of one rendered node.
///
/// Every read may fail transiently; `attribute` returns `Ok(None)` when the
/// node has no such attribute.
pub trait WebElement: fmt::Debug + Send + Sync {
    /// Read a named attribute
    fn attribute(&self, name: &str) -> Result<Option<String>, DriverError>;

    /// Read the rendered text
    fn text(&self) -> Result<String, DriverError>;

    /// Read the computed accessible name
    fn accessible_name(&self) -> Result<String, DriverError>;
}

/// Shared handle to a driver-owned node.
///
/// Cloning is cheap; equality is handle identity.
#[derive(Clone)]
pub struct ElementHandle(Arc<dyn WebElement>);

impl ElementHandle {
    /// Wrap a driver element
    #[must_use]
    pub fn new<E: WebElement + 'static>(element: E) -> Self {
        Self(Arc::new(element))
    }

    /// Wrap an already shared driver element
    #[must_use]
    pub fn from_arc(element: Arc<dyn WebElement>) -> Self {
        Self(element)
    }

    /// Read a named attribute
    pub fn attribute(&self, name: &str) -> Result<Option<String>, DriverError> {
        self.0.attribute(name)
    }

    /// Read the rendered text
    pub fn text(&self) -> Result<String, DriverError> {
        self.0.text()
    }

    /// Read the accessible name
    pub fn accessible_name(&self) -> Result<String, DriverError> {
        self.0.accessible_name()
    }

    /// Whether both handles point at the same node
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0).cast::<()>() == Arc::as_ptr(&other.0).cast::<()>()
    }
}

impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for ElementHandle {}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementHandle").field(&self.0).finish()
    }
}

/// Browser driver capability.
///
/// Implementations wrap a live session; it is passed explicitly to whatever
/// needs it and outlives every acquisition call.
pub trait Driver: Send + Sync {
    /// Find the first element matching the locator
    fn find_element(&self, locator: &Locator) -> Result<ElementHandle, DriverError>;

    /// Find all elements matching the locator (possibly none)
    fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>, DriverError>;

    /// Current implicit wait
    fn implicit_wait(&self) -> Duration;

    /// Set the implicit wait applied by blocking driver calls
    fn set_implicit_wait(&self, wait: Duration);
}
