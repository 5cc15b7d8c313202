//! Pagefinder CLI: inspect selector repositories and acquisition settings
//!
//! ## Usage
//!
//! ```bash
//! pagefinder locate -r pages.json -p LoginPage -e submit --types id,css
//! pagefinder selector --strategy xpath data-id=7 role=button
//! pagefinder inspect -r pages.json
//! pagefinder config --file pagefinder.yaml
//! ```

use clap::Parser;
use pagefinder_cli::{
    handlers::{execute_config, execute_inspect, execute_locate, execute_selector},
    init_tracing, Cli, CliConfig, CliResult, ColorChoice, Commands, Printer, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    match run(&cli, &printer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            printer.failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, printer: &Printer) -> CliResult<()> {
    match &cli.command {
        Commands::Locate(args) => execute_locate(args, printer),
        Commands::Selector(args) => execute_selector(args, printer),
        Commands::Inspect(args) => execute_inspect(args, printer),
        Commands::Config(args) => execute_config(args, printer),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
