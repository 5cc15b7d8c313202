//! Inspect command handler

use crate::commands::{InspectArgs, OutputFormat};
use crate::error::CliResult;
use crate::output::Printer;
use pagefinder::{AcquisitionError, ElementEntry, ObjectRepository, PageEntry};

/// Execute the inspect command
pub fn execute_inspect(args: &InspectArgs, printer: &Printer) -> CliResult<()> {
    let document = ObjectRepository::from_path(&args.repository)?;
    let pages = select_pages(&document, args.page.as_deref())?;

    match args.format {
        OutputFormat::Text => {
            if pages.is_empty() {
                printer.warning("repository declares no pages");
            }
            for page in pages {
                printer.heading(&format!("{} ({} elements)", page.name, page.elements.len()));
                for element in &page.elements {
                    printer.entry(&element.element_name, &describe_element(element));
                }
            }
        }
        OutputFormat::Json => {
            printer.line(&serde_json::to_string_pretty(&pages)?);
        }
    }
    Ok(())
}

fn select_pages<'d>(
    document: &'d ObjectRepository,
    page: Option<&str>,
) -> CliResult<Vec<&'d PageEntry>> {
    match page {
        Some(name) => {
            let entry = document
                .page(name)
                .ok_or_else(|| AcquisitionError::not_found("page", name))?;
            Ok(vec![entry])
        }
        None => Ok(document.pages.iter().collect()),
    }
}

/// Declared strategies of an element, as `strategy=value` pairs
#[must_use]
pub fn describe_element(element: &ElementEntry) -> String {
    let declared: Vec<String> = element
        .declared_types()
        .into_iter()
        .filter_map(|t| element.strategy(t).map(|value| format!("{t}={value}")))
        .collect();
    if declared.is_empty() {
        "(no usable strategies)".to_string()
    } else {
        declared.join(", ")
    }
}
