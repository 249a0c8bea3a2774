/*!
 * Structured Tracing
 * Subscriber setup and timed spans for shell commands
 *
 * Logs always go to stderr so they never interleave with command output.
 */

use crate::shell::ShellConfig;
use std::time::Instant;
use tracing::{debug, span, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// Falls back to the default filter when `config.log_filter` does not parse.
/// Calling this twice is a no-op.
pub fn init_tracing(config: &ShellConfig) {
    let env_filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::shell::config::DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.trace_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!(json = config.trace_json, filter = %config.log_filter, "Tracing initialized");
    }
}

/// Span covering one shell command, logging its duration when dropped
pub struct CommandSpan {
    span: tracing::Span,
    start: Instant,
}

impl CommandSpan {
    pub fn new(command: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "command",
            command = command,
            result = tracing::field::Empty,
            status = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn record_status(&self, status: i32) {
        self.span
            .record("result", if status == 0 { "success" } else { "error" });
        self.span.record("status", status);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        debug!(duration_us = self.start.elapsed().as_micros() as u64, "command completed");
    }
}

pub fn span_command(command: &str) -> CommandSpan {
    CommandSpan::new(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        let config = ShellConfig {
            log_filter: "not a [valid filter".to_string(),
            ..ShellConfig::default()
        };
        init_tracing(&config);
        init_tracing(&ShellConfig::default());
    }

    #[test]
    fn test_command_span() {
        let span = span_command("echo");
        {
            let _entered = span.enter();
            debug!("inside command");
        }
        span.record_status(0);
    }
}
