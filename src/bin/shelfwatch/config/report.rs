//! Report Config

use clap::Args;
use jiff::civil::Date;
use shelfwatch::{
    alerts::{AlertFilter, AlertKind, SeverityFilter},
    dates::parse_date,
    expiry::DEFAULT_EXPIRING_SOON_DAYS,
    forecasts::ForecastOrder,
    report::ReportOptions,
};

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Terminal tables.
    Table,

    /// Pretty-printed JSON.
    Json,
}

/// Report settings.
#[derive(Debug, Args)]
pub(crate) struct ReportConfig {
    /// Reference date for day counts (defaults to the local date)
    #[arg(long, env = "SHELFWATCH_TODAY", value_parser = parse_date)]
    pub today: Option<Date>,

    /// Width of the expiring-soon window in days
    #[arg(short, long, env = "SHELFWATCH_WINDOW_DAYS", default_value_t = DEFAULT_EXPIRING_SOON_DAYS)]
    pub window_days: i32,

    /// Only list alerts of this kind
    #[arg(long, value_enum)]
    pub kind: Option<AlertKind>,

    /// Only list alerts of this severity
    #[arg(long, value_enum)]
    pub severity: Option<SeverityFilter>,

    /// Only list forecasts for this product category
    #[arg(long)]
    pub category: Option<String>,

    /// Forecast ordering
    #[arg(long, value_enum, default_value_t = ForecastOrder::Forecast)]
    pub order: ForecastOrder,

    /// Maximum number of forecasts to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ReportConfig {
    /// Report options derived from these settings.
    pub(crate) fn options(&self) -> ReportOptions {
        ReportOptions {
            window_days: self.window_days,
            alert_filter: AlertFilter {
                kind: self.kind,
                severity: self.severity,
            },
            category: self.category.clone(),
            forecast_order: self.order,
            top: self.top,
        }
    }
}
