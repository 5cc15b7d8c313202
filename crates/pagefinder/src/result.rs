//! Result and error types for pagefinder.

use crate::driver::{DriverError, DriverErrorKind};
use thiserror::Error;

/// Result type for acquisition operations
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

/// Errors that can occur while acquiring elements
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// No candidate matched within the timeout, or a named entry does not exist
    #[error("No {key} matching '{value}' could be found")]
    NotFound {
        /// What was searched for (element, component, page, ...)
        key: String,
        /// The value that was searched for
        value: String,
    },

    /// The repository holds no page under the requested name
    #[error("Repository does not contain an instance of {page}")]
    MissingPage {
        /// Normalized page name
        page: String,
    },

    /// A read against a candidate failed because the node was detached or stale
    #[error("Transient read failure: {0}")]
    TransientRead(DriverError),

    /// Static mis-declaration: wrong field kind, unsupported strategy, malformed document
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Persistent driver failure
    #[error("Driver error: {0}")]
    Driver(DriverError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Coarse failure class, preserved from primitives up to the test step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The element genuinely is absent
    NotFound,
    /// The node was unstable while it was read
    TransientRead,
    /// The framework or the models are misconfigured
    Configuration,
    /// The driver session failed
    Driver,
}

impl AcquisitionError {
    /// Create a not-found error
    #[must_use]
    pub fn not_found(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotFound {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } | Self::MissingPage { .. } => ErrorClass::NotFound,
            Self::TransientRead(_) => ErrorClass::TransientRead,
            Self::Configuration { .. } | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => {
                ErrorClass::Configuration
            }
            Self::Driver(_) => ErrorClass::Driver,
        }
    }

    /// Whether retrying could change the outcome
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self.class(), ErrorClass::TransientRead)
    }
}

impl From<DriverError> for AcquisitionError {
    fn from(err: DriverError) -> Self {
        match err.kind() {
            DriverErrorKind::NoSuchElement => Self::NotFound {
                key: "element".to_string(),
                value: err.message().to_string(),
            },
            DriverErrorKind::InvalidSelector => Self::Configuration {
                message: err.to_string(),
            },
            kind if kind.is_transient() => Self::TransientRead(err),
            _ => Self::Driver(err),
        }
    }
}
