//! Pagefinder CLI Library
//!
//! Command-line tooling over JSON selector repositories and acquisition
//! configuration.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, InspectArgs, LocateArgs, OutputFormat, SelectorArgs,
    StrategyArg,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_tracing;
pub use output::{format_entry, Printer};
