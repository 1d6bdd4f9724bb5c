//! Logging Config
//!
//! Diagnostics always go to stderr; stdout carries only the report.

use clap::Args;

/// How diagnostics are written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// One short line per event, for reading alongside a table report.
    Compact,

    /// One JSON object per event, for log collectors.
    Json,
}

/// Diagnostic logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Filter directive for diagnostics, e.g. `info` or `shelfwatch=debug`
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Diagnostic format on stderr (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
