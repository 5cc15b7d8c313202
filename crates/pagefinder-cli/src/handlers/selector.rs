//! Selector command handler

use crate::commands::SelectorArgs;
use crate::error::CliResult;
use crate::output::Printer;
use pagefinder::{selector_by_attributes, SelectorType};

/// Execute the selector command
pub fn execute_selector(args: &SelectorArgs, printer: &Printer) -> CliResult<()> {
    printer.line(&generate_selector(args.strategy.into(), &args.pairs)?);
    Ok(())
}

/// Selector text conjoining every `(attribute, value)` pair
pub fn generate_selector(strategy: SelectorType, pairs: &[(String, String)]) -> CliResult<String> {
    Ok(selector_by_attributes(strategy, pairs)?.value().to_string())
}
