//! Command handlers
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod config;
pub mod inspect;
pub mod locate;
pub mod selector;

pub use config::{effective_config, execute_config};
pub use inspect::{describe_element, execute_inspect};
pub use locate::execute_locate;
pub use selector::{execute_selector, generate_selector};
