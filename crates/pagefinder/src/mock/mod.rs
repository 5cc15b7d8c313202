//! In-memory driver and elements.
//!
//! Lets page models and acquisition flows be tested without a browser.
//! Elements are scriptable: text can be swapped to simulate a re-render and
//! reads can be made to fail, either a fixed number of times (transient
//! instability) or always (a broken session).
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagefinder::mock::{MockDriver, MockElement};
//! use pagefinder::{Locator, Selector};
//!
//! let laptops = MockElement::new("Laptops").with_failures(2, DriverError::stale("re-render"));
//! let driver = MockDriver::new();
//! driver.register(Selector::css(".category"), laptops.handle());
//!
//! let found = driver.find_elements(&Locator::new(Selector::css(".category")))?;
//! ```

mod driver;
mod element;

pub use driver::MockDriver;
pub use element::MockElement;
