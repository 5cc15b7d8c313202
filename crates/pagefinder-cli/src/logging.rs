//! Log subscriber setup.
//!
//! Library spans and events go to stderr so command output on stdout stays
//! machine-readable. `RUST_LOG` overrides the level chosen by `-v`/`-q`.

use crate::config::CliConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber; a second call is a no-op
pub fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color.should_color())
                .with_target(config.verbosity.is_verbose()),
        )
        .try_init();
}
