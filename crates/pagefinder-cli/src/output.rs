//! Output formatting

use console::{style, Term};

/// Writes command results to stdout and notices to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a result line; results are printed even in quiet mode
    pub fn line(&self, text: &str) {
        let _ = self.out.write_line(text);
    }

    /// Print a section heading
    pub fn heading(&self, text: &str) {
        if self.use_color {
            self.line(&style(text).bold().to_string());
        } else {
            self.line(text);
        }
    }

    /// Print an indented `key  value` entry
    pub fn entry(&self, key: &str, value: &str) {
        self.line(&format_entry(key, value, self.use_color));
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an error to stderr, even in quiet mode
    pub fn failure(&self, message: &str) {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "Error:".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}

/// Format an indented entry, padding keys to a common column
#[must_use]
pub fn format_entry(key: &str, value: &str, use_color: bool) -> String {
    let key = format!("{key:<16}");
    if use_color {
        format!("  {} {value}", style(key).cyan())
    } else {
        format!("  {key} {value}")
    }
}
