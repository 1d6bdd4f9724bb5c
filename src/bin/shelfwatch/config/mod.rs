//! Command line configuration

use clap::Parser;

use crate::config::{logging::LoggingConfig, report::ReportConfig, source::SourceConfig};

pub(crate) mod logging;
pub(crate) mod report;
pub(crate) mod source;

/// Shelfwatch inventory report configuration
#[derive(Debug, Parser)]
#[command(name = "shelfwatch", about = "Inventory expiry and alert report", long_about = None)]
pub(crate) struct Config {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Where inventory records come from.
    #[command(flatten)]
    pub source: SourceConfig,

    /// Report contents and output format.
    #[command(flatten)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
