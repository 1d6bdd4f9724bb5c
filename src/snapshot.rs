//! Snapshot
//!
//! The four collections the dashboard works from, fetched together and
//! replaced wholesale on refresh.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    alerts::{Alert, AlertStats},
    expiry::{ExpiryBreakdown, ExpiryRecord, filter_expiring_within},
    forecasts::{Forecast, ForecastSummary, aggregate},
    products::{Product, ProductCatalog},
};

/// Point-in-time copy of the inventory data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Products
    #[serde(default)]
    pub products: Vec<Product>,

    /// Expiry records
    #[serde(default)]
    pub expiry: Vec<ExpiryRecord>,

    /// Alerts
    #[serde(default)]
    pub alerts: Vec<Alert>,

    /// Demand forecasts
    #[serde(default)]
    pub forecasts: Vec<Forecast>,
}

impl Snapshot {
    /// Product lookup over this snapshot's products.
    pub fn catalog(&self) -> ProductCatalog<'_> {
        ProductCatalog::new(&self.products)
    }

    /// Dashboard figures for `today`.
    pub fn summary(&self, today: Date, window_days: i32) -> DashboardSummary {
        DashboardSummary {
            today,
            window_days,
            total_products: self.products.len(),
            alerts: AlertStats::from_alerts(&self.alerts),
            expiring_within_window: filter_expiring_within(&self.expiry, today, window_days).len(),
            expiry: ExpiryBreakdown::from_records(&self.expiry, today, window_days),
            forecasts: aggregate(&self.forecasts),
        }
    }
}

/// Headline figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Reference date the figures were computed for
    pub today: Date,

    /// Width of the expiring-soon window in days
    pub window_days: i32,

    /// Number of products
    pub total_products: usize,

    /// Alert counts; `alerts.total` is the total alert count
    pub alerts: AlertStats,

    /// Records dated within `[today, today + window_days]`
    pub expiring_within_window: usize,

    /// Records per expiry status
    pub expiry: ExpiryBreakdown,

    /// Forecast aggregates
    pub forecasts: ForecastSummary,
}
