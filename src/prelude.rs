//! Shelfwatch prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    alerts::{
        Alert, AlertFilter, AlertKind, AlertStats, CRITICAL_EXPIRY_DAYS, ExpiryAlert,
        LowStockAlert, NotificationKey, Severity, SeverityFilter, is_critical_alert,
        is_warning_alert, pending_notifications,
    },
    dates::{DateError, ToCalendarDate, days_until, format_date, parse_date},
    expiry::{
        DEFAULT_EXPIRING_SOON_DAYS, ExpiryBreakdown, ExpiryRecord, ExpiryStatus, classify_expiry,
        filter_expiring_within, is_expired, is_expiring_soon, records_for_product,
    },
    fixtures::{Fixture, FixtureError},
    forecasts::{Forecast, ForecastOrder, ForecastSummary, RankedForecasts, aggregate, rank_forecasts},
    products::{Product, ProductCatalog, ProductError, ProductId, is_valid_barcode},
    report::{Report, ReportError, ReportOptions},
    snapshot::{DashboardSummary, Snapshot},
    source::{DataSource, SourceError},
};
