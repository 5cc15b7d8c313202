//! Config command handler

use crate::commands::ConfigArgs;
use crate::error::CliResult;
use crate::output::Printer;
use pagefinder::AcquisitionConfig;
use std::path::Path;
use tracing::info;

/// Execute the config command
pub fn execute_config(args: &ConfigArgs, printer: &Printer) -> CliResult<()> {
    let config = effective_config(args.file.as_deref())?;
    let yaml = config.to_yaml()?;
    printer.line(yaml.trim_end());
    Ok(())
}

/// Configuration loaded from `file`, or the defaults
pub fn effective_config(file: Option<&Path>) -> CliResult<AcquisitionConfig> {
    match file {
        Some(path) => {
            info!(path = %path.display(), "Loading acquisition configuration");
            Ok(AcquisitionConfig::from_path(path)?)
        }
        None => Ok(AcquisitionConfig::default()),
    }
}
