//! Locate command handler

use crate::commands::{LocateArgs, OutputFormat};
use crate::error::CliResult;
use crate::output::Printer;
use pagefinder::ObjectRepository;
use serde_json::json;
use tracing::info;

/// Execute the locate command
pub fn execute_locate(args: &LocateArgs, printer: &Printer) -> CliResult<()> {
    let document = ObjectRepository::from_path(&args.repository)?;
    let selector_types = args.selector_types();
    info!(
        repository = %args.repository.display(),
        page = %args.page,
        element = %args.element,
        "Resolving locator"
    );
    let locator = document.declared_locator(&args.element, &args.page, &selector_types)?;

    match args.format {
        OutputFormat::Text => {
            printer.line(&locator.to_string());
            for selector in locator.selectors() {
                printer.entry(selector.strategy(), selector.value());
            }
        }
        OutputFormat::Json => {
            let value = json!({
                "page": args.page,
                "element": args.element,
                "selectors": locator,
            });
            printer.line(&serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pagefinder::ErrorClass;
    use std::io::Write;
    use std::path::PathBuf;

    const DOCUMENT: &str = r##"{
        "pages": [
            {
                "name": "LoginPage",
                "elements": [
                    { "elementName": "submit", "id": "login-btn", "cssSelector": "form button" },
                    { "elementName": "banner", "xpath": "//div[@id='banner']" }
                ]
            }
        ]
    }"##;

    fn args(repository: PathBuf, element: &str, types: Vec<pagefinder::SelectorType>) -> LocateArgs {
        LocateArgs {
            repository,
            page: "LoginPage".to_string(),
            element: element.to_string(),
            types,
            format: OutputFormat::Json,
        }
    }

    fn repository_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_locate_declared_element() {
        let file = repository_file();
        let printer = Printer::new(false, true);
        execute_locate(&args(file.path().to_path_buf(), "submit", Vec::new()), &printer).unwrap();
    }

    #[test]
    fn test_unknown_element_is_not_found() {
        let file = repository_file();
        let printer = Printer::new(false, true);
        let err = execute_locate(&args(file.path().to_path_buf(), "cancel", Vec::new()), &printer).unwrap_err();
        let CliError::Acquisition(err) = err else {
            panic!("expected acquisition error");
        };
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    #[test]
    fn test_no_requested_strategy_is_configuration_error() {
        let file = repository_file();
        let printer = Printer::new(false, true);
        let types = vec![pagefinder::SelectorType::Id];
        let err = execute_locate(&args(file.path().to_path_buf(), "banner", types), &printer).unwrap_err();
        let CliError::Acquisition(err) = err else {
            panic!("expected acquisition error");
        };
        assert_eq!(err.class(), ErrorClass::Configuration);
    }
}
