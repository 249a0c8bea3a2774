/*!
 * Shell Configuration
 * Runtime settings read from the environment at startup
 */

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Log filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Print the `$ ` prompt before each line
    pub interactive: bool,
    /// Emit logs as JSON lines instead of compact text
    pub trace_json: bool,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl ShellConfig {
    /// Environment variables:
    /// - RUST_LOG: log filter (default: warn)
    /// - MYSH_TRACE_JSON: JSON log output when `1` or `true`
    ///
    /// The shell is interactive when stdin is a terminal.
    pub fn from_env() -> Self {
        let trace_json = std::env::var("MYSH_TRACE_JSON")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);
        let log_filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Self {
            interactive: std::io::stdin().is_terminal(),
            trace_json,
            log_filter,
        }
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            trace_json: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
