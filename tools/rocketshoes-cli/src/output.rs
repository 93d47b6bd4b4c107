//! Output formatting for the CLI.

use console::style;
use rocketshoes_cart::{Notice, Notifier};
use serde::Serialize;

/// Output handler for CLI messages.
///
/// Doubles as the cart's notification sink, rendering notices as warnings.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Whether JSON output was requested.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "warning": msg }));
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key/value line.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {:<16} {}", style(key).dim(), value);
    }

    /// Print a value as pretty JSON.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => self.error(&format!("Failed to serialize output: {}", e)),
        }
    }
}

impl Notifier for Output {
    fn notify(&self, notice: Notice) {
        self.warn(notice.message());
    }
}

/// Format a price the way the storefront shows it.
pub fn format_price(value: f64) -> String {
    format!("R$ {:.2}", value)
}
