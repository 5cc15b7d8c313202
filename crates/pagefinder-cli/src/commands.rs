//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use pagefinder::SelectorType;
use std::path::PathBuf;

/// Pagefinder: page-object element acquisition tooling
#[derive(Parser, Debug)]
#[command(name = "pagefinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the match-any locator declared for an element
    Locate(LocateArgs),

    /// Generate an attribute selector from attr=value pairs
    Selector(SelectorArgs),

    /// List pages and element declarations of a JSON repository
    Inspect(InspectArgs),

    /// Print the effective acquisition configuration as YAML
    Config(ConfigArgs),
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// JSON selector repository
    #[arg(short, long)]
    pub repository: PathBuf,

    /// Page name
    #[arg(short, long)]
    pub page: String,

    /// Element name
    #[arg(short, long)]
    pub element: String,

    /// Strategies to combine, in order (default: all)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_selector_type)]
    pub types: Vec<SelectorType>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl LocateArgs {
    /// Requested strategies, or every strategy when none were given
    #[must_use]
    pub fn selector_types(&self) -> Vec<SelectorType> {
        if self.types.is_empty() {
            SelectorType::ALL.to_vec()
        } else {
            self.types.clone()
        }
    }
}

/// Arguments for the selector command
#[derive(Parser, Debug)]
pub struct SelectorArgs {
    /// Primary strategy
    #[arg(short, long, default_value = "css")]
    pub strategy: StrategyArg,

    /// Attribute predicates as attr=value
    #[arg(required = true, value_parser = parse_attribute_pair)]
    pub pairs: Vec<(String, String)>,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// JSON selector repository
    #[arg(short, long)]
    pub repository: PathBuf,

    /// Only show this page
    #[arg(short, long)]
    pub page: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// YAML configuration file (defaults apply to missing keys)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Strategies that can conjoin attribute predicates
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategyArg {
    /// CSS attribute selectors
    #[default]
    Css,
    /// XPath attribute predicates
    Xpath,
}

impl From<StrategyArg> for SelectorType {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Css => Self::Css,
            StrategyArg::Xpath => Self::XPath,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

fn parse_selector_type(s: &str) -> Result<SelectorType, String> {
    s.trim().parse().map_err(|e: pagefinder::AcquisitionError| e.to_string())
}

fn parse_attribute_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((attr, value)) if !attr.trim().is_empty() => {
            Ok((attr.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected attr=value, got '{s}'")),
    }
}
