//! Bounded polling over a pre-fetched candidate list.
//!
//! Each probe of a candidate yields an explicit [`Outcome`]; the poller scans
//! candidates in document order, pass after pass, until one matches, a probe
//! fails for good, or the timeout elapses.
//!
//! There is no sleep between passes: blocking driver reads are paced by the
//! driver's own implicit wait, which the poller re-asserts after any pass
//! that saw a transient failure.

use crate::config::AcquisitionConfig;
use crate::driver::{Driver, DriverError, DriverErrorKind};
use crate::result::{AcquisitionError, AcquisitionResult};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of probing one candidate
#[derive(Debug)]
pub enum Outcome<T> {
    /// The candidate satisfies the predicate
    Matched(T),
    /// No match this pass, with the transient read failure if there was one
    NotYetMatched(Option<DriverError>),
    /// Polling cannot succeed; abort with this error
    Failed(AcquisitionError),
}

impl<T> Outcome<T> {
    /// Classify a failed driver read: transient kinds keep polling,
    /// anything else aborts
    #[must_use]
    pub fn from_driver_error(err: DriverError) -> Self {
        if err.is_transient() {
            Self::NotYetMatched(Some(err))
        } else {
            Self::Failed(err.into())
        }
    }

    /// Matched or not, from a predicate result
    #[must_use]
    pub fn when(matched: bool, value: impl FnOnce() -> T) -> Self {
        if matched {
            Self::Matched(value())
        } else {
            Self::NotYetMatched(None)
        }
    }
}

// =============================================================================
// POLLER
// =============================================================================

/// Timeout-bounded scanner
#[derive(Clone)]
pub struct Poller {
    timeout: Duration,
    implicit_wait: Duration,
    driver: Option<Arc<dyn Driver>>,
}

impl fmt::Debug for Poller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("timeout", &self.timeout)
            .field("implicit_wait", &self.implicit_wait)
            .field("driver", &self.driver.is_some())
            .finish()
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::from_config(&AcquisitionConfig::default())
    }
}

impl Poller {
    /// Create a poller with the given timeout
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Create a poller from configuration
    #[must_use]
    pub const fn from_config(config: &AcquisitionConfig) -> Self {
        Self {
            timeout: config.element_timeout(),
            implicit_wait: config.implicit_wait(),
            driver: None,
        }
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the implicit wait re-asserted after unstable passes
    #[must_use]
    pub const fn with_implicit_wait(mut self, wait: Duration) -> Self {
        self.implicit_wait = wait;
        self
    }

    /// Attach the driver whose implicit wait is re-asserted
    #[must_use]
    pub fn with_driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Configured timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Scan `candidates` until `probe` matches one.
    ///
    /// Returns the first match in candidate order. Fails with the probe's
    /// error on [`Outcome::Failed`], or with `NotFound { key, value }` once
    /// the timeout has fully elapsed.
    pub fn poll<C, T, F>(
        &self,
        key: &str,
        value: &str,
        candidates: &[C],
        mut probe: F,
    ) -> AcquisitionResult<T>
    where
        F: FnMut(&C) -> Outcome<T>,
    {
        let start = Instant::now();
        let mut reported: HashSet<DriverErrorKind> = HashSet::new();
        let mut passes: u64 = 0;

        while start.elapsed() < self.timeout {
            passes += 1;
            let mut unstable: HashSet<DriverErrorKind> = HashSet::new();

            for candidate in candidates {
                match probe(candidate) {
                    Outcome::Matched(found) => {
                        debug!(key, value, passes, elapsed_ms = ms(start.elapsed()), "matched");
                        return Ok(found);
                    }
                    Outcome::NotYetMatched(None) => {}
                    Outcome::NotYetMatched(Some(cause)) => {
                        if unstable.insert(cause.kind()) {
                            if reported.insert(cause.kind()) {
                                warn!(key, value, kind = %cause.kind(), "Iterating... ({cause})");
                            } else {
                                debug!(key, value, kind = %cause.kind(), passes, "still iterating");
                            }
                        }
                    }
                    Outcome::Failed(err) => {
                        debug!(key, value, passes, error = %err, "aborting poll");
                        return Err(err);
                    }
                }
            }

            if !unstable.is_empty() {
                if let Some(driver) = &self.driver {
                    driver.set_implicit_wait(self.implicit_wait);
                }
            }
        }

        debug!(key, value, passes, timeout_ms = ms(self.timeout), "timed out");
        Err(AcquisitionError::not_found(key, value))
    }
}

fn ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
