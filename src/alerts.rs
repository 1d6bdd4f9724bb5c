//! Alerts
//!
//! Severity is decided in exactly one place, [`Alert::severity`]. The dashboard
//! summary, alert filters and notification triggers all go through it.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::products::{ProductCatalog, ProductId};

/// Expiry alerts at or below this many days left are critical.
pub const CRITICAL_EXPIRY_DAYS: i32 = 3;

/// An alert raised by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    /// A product batch is close to, or past, its expiry date.
    Expiry(ExpiryAlert),

    /// A product's stock is below its minimum.
    LowStock(LowStockAlert),
}

/// Payload of an [`Alert::Expiry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryAlert {
    /// Product the alert refers to
    pub product_id: ProductId,

    /// Expiry date of the batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    /// Days left until expiry, as computed by the alert source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i32>,
}

/// Payload of an [`Alert::LowStock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    /// Product the alert refers to
    pub product_id: ProductId,

    /// Latest stock count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<u32>,

    /// Minimum stock configured for the product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<u32>,
}

/// Alert variant without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Expiry alerts
    Expiry,

    /// Low stock alerts
    LowStock,
}

impl AlertKind {
    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Expiry => "Expiry",
            Self::LowStock => "Low stock",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How urgently an alert needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Expiry within [`CRITICAL_EXPIRY_DAYS`] days, or no stock left.
    Critical,

    /// Expiry further out, or some stock left.
    Warning,

    /// The field severity depends on is absent.
    Unknown,
}

impl Severity {
    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Alert {
    /// The alert variant.
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::Expiry(_) => AlertKind::Expiry,
            Self::LowStock(_) => AlertKind::LowStock,
        }
    }

    /// The product the alert refers to.
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::Expiry(alert) => alert.product_id,
            Self::LowStock(alert) => alert.product_id,
        }
    }

    /// Severity of the alert.
    ///
    /// Expiry alerts read the `days_left` carried on the alert; it is not
    /// recomputed from the expiry date. Absent fields give [`Severity::Unknown`].
    pub fn severity(&self) -> Severity {
        match self {
            Self::Expiry(ExpiryAlert {
                days_left: Some(days),
                ..
            }) if *days <= CRITICAL_EXPIRY_DAYS => Severity::Critical,
            Self::LowStock(LowStockAlert {
                current_stock: Some(0),
                ..
            }) => Severity::Critical,
            Self::Expiry(ExpiryAlert {
                days_left: Some(_),
                ..
            })
            | Self::LowStock(LowStockAlert {
                current_stock: Some(_),
                ..
            }) => Severity::Warning,
            Self::Expiry(ExpiryAlert { days_left: None, .. })
            | Self::LowStock(LowStockAlert {
                current_stock: None,
                ..
            }) => Severity::Unknown,
        }
    }

    /// One-line title, e.g. `Whole Milk - Expiring in 2 days`.
    pub fn title(&self, catalog: &ProductCatalog<'_>) -> String {
        let label = catalog.label(self.product_id());

        match self {
            Self::Expiry(ExpiryAlert {
                days_left: Some(days),
                ..
            }) if *days <= 0 => format!("{label} - Expired"),
            Self::Expiry(ExpiryAlert {
                days_left: Some(days),
                ..
            }) if *days <= CRITICAL_EXPIRY_DAYS => format!("{label} - Expiring in {days} days"),
            Self::Expiry(_) => format!("{label} - Expiring soon"),
            Self::LowStock(_) => format!("{label} - Low stock"),
        }
    }

    /// Key used to avoid notifying twice about the same product and alert kind.
    pub fn notification_key(&self) -> NotificationKey {
        NotificationKey {
            product_id: self.product_id(),
            kind: self.kind(),
        }
    }
}

/// Whether the alert is critical.
pub fn is_critical_alert(alert: &Alert) -> bool {
    alert.severity() == Severity::Critical
}

/// Whether the alert is a warning. Alerts of unknown severity are neither critical nor warning.
pub fn is_warning_alert(alert: &Alert) -> bool {
    alert.severity() == Severity::Warning
}

/// Severity selector for [`AlertFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SeverityFilter {
    /// Only critical alerts
    Critical,

    /// Only warning alerts
    Warning,
}

impl SeverityFilter {
    /// Whether `severity` is selected. [`Severity::Unknown`] is never selected.
    pub fn matches(self, severity: Severity) -> bool {
        matches!(
            (self, severity),
            (Self::Critical, Severity::Critical) | (Self::Warning, Severity::Warning)
        )
    }
}

/// Alert list filter; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Restrict to one alert kind
    pub kind: Option<AlertKind>,

    /// Restrict to one severity
    pub severity: Option<SeverityFilter>,
}

impl AlertFilter {
    /// Whether the alert passes the filter.
    pub fn matches(&self, alert: &Alert) -> bool {
        self.kind.is_none_or(|kind| alert.kind() == kind)
            && self
                .severity
                .is_none_or(|severity| severity.matches(alert.severity()))
    }

    /// Alerts passing the filter, in their original order.
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts.iter().filter(|alert| self.matches(alert)).collect()
    }
}

/// Alert counts for summary displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    /// All alerts
    pub total: usize,

    /// Expiry alerts
    pub expiry: usize,

    /// Low stock alerts
    pub low_stock: usize,

    /// Critical alerts of either kind
    pub critical: usize,

    /// Warning alerts of either kind
    pub warning: usize,
}

impl AlertStats {
    /// Count the alerts.
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut stats, alert| {
            stats.total += 1;

            match alert.kind() {
                AlertKind::Expiry => stats.expiry += 1,
                AlertKind::LowStock => stats.low_stock += 1,
            }

            match alert.severity() {
                Severity::Critical => stats.critical += 1,
                Severity::Warning => stats.warning += 1,
                Severity::Unknown => {}
            }

            stats
        })
    }
}

/// Identity of a notification: one per product and alert kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationKey {
    /// Product the notification is about
    pub product_id: ProductId,

    /// Kind of alert that raised it
    pub kind: AlertKind,
}

/// Critical alerts that have not been notified yet.
///
/// `seen` holds the keys the caller has already notified about. Within one call
/// only the first critical alert per key is returned.
pub fn pending_notifications<'a>(
    alerts: &'a [Alert],
    seen: &FxHashSet<NotificationKey>,
) -> Vec<&'a Alert> {
    let mut raised = FxHashSet::default();

    alerts
        .iter()
        .filter(|alert| is_critical_alert(alert))
        .filter(|alert| {
            let key = alert.notification_key();

            !seen.contains(&key) && raised.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::products::Product;

    fn expiry(product_id: u32, days_left: Option<i32>) -> Alert {
        Alert::Expiry(ExpiryAlert {
            product_id: ProductId(product_id),
            expiry_date: None,
            days_left,
        })
    }

    fn low_stock(product_id: u32, current_stock: Option<u32>) -> Alert {
        Alert::LowStock(LowStockAlert {
            product_id: ProductId(product_id),
            current_stock,
            min_stock: Some(10),
        })
    }

    #[test]
    fn low_stock_is_critical_only_at_zero() {
        assert!(is_critical_alert(&low_stock(1, Some(0))));
        assert!(!is_critical_alert(&low_stock(1, Some(5))));
        assert!(!is_critical_alert(&low_stock(1, None)));
    }

    #[test]
    fn expiry_is_critical_at_three_days_or_fewer() {
        assert!(is_critical_alert(&expiry(1, Some(3))));
        assert!(is_critical_alert(&expiry(1, Some(0))));
        assert!(is_critical_alert(&expiry(1, Some(-2))));
        assert!(!is_critical_alert(&expiry(1, Some(4))));
        assert!(!is_critical_alert(&expiry(1, None)));
    }

    #[test]
    fn warning_complements_critical_for_known_fields() {
        assert!(is_warning_alert(&expiry(1, Some(4))));
        assert!(!is_warning_alert(&expiry(1, Some(3))));
        assert!(is_warning_alert(&low_stock(1, Some(1))));
        assert!(!is_warning_alert(&low_stock(1, Some(0))));
    }

    #[test]
    fn absent_fields_are_unknown_severity() {
        for alert in [expiry(1, None), low_stock(2, None)] {
            assert_eq!(alert.severity(), Severity::Unknown);
            assert!(!is_critical_alert(&alert));
            assert!(!is_warning_alert(&alert));
        }
    }

    #[test]
    fn severity_filter_never_matches_unknown() {
        let alerts = [expiry(1, None), expiry(2, Some(1)), low_stock(3, Some(4))];

        let critical = AlertFilter {
            kind: None,
            severity: Some(SeverityFilter::Critical),
        };
        let warning = AlertFilter {
            kind: None,
            severity: Some(SeverityFilter::Warning),
        };

        assert_eq!(critical.apply(&alerts), [&expiry(2, Some(1))]);
        assert_eq!(warning.apply(&alerts), [&low_stock(3, Some(4))]);
        assert_eq!(AlertFilter::default().apply(&alerts).len(), 3);
    }

    #[test]
    fn filter_combines_kind_and_severity() {
        let alerts = [expiry(1, Some(1)), low_stock(2, Some(0)), low_stock(3, Some(7))];

        let filter = AlertFilter {
            kind: Some(AlertKind::LowStock),
            severity: Some(SeverityFilter::Critical),
        };

        assert_eq!(filter.apply(&alerts), [&low_stock(2, Some(0))]);
    }

    #[test]
    fn stats_count_kinds_and_severities() {
        let alerts = [
            expiry(1, Some(2)),
            expiry(2, Some(6)),
            expiry(3, None),
            low_stock(4, Some(0)),
            low_stock(5, Some(3)),
        ];

        assert_eq!(
            AlertStats::from_alerts(&alerts),
            AlertStats {
                total: 5,
                expiry: 3,
                low_stock: 2,
                critical: 2,
                warning: 2,
            }
        );
        assert_eq!(AlertStats::from_alerts(&[]), AlertStats::default());
    }

    #[test]
    fn titles_describe_the_alert() {
        let products = [Product {
            id: ProductId(1),
            name: "Whole Milk".to_string(),
            barcode: "5000112637922".to_string(),
            category: None,
            min_stock: None,
            max_stock: None,
        }];
        let catalog = ProductCatalog::new(&products);

        assert_eq!(expiry(1, Some(-1)).title(&catalog), "Whole Milk - Expired");
        assert_eq!(
            expiry(1, Some(2)).title(&catalog),
            "Whole Milk - Expiring in 2 days"
        );
        assert_eq!(expiry(1, Some(5)).title(&catalog), "Whole Milk - Expiring soon");
        assert_eq!(expiry(1, None).title(&catalog), "Whole Milk - Expiring soon");
        assert_eq!(low_stock(9, Some(0)).title(&catalog), "Product 9 - Low stock");
    }

    #[test]
    fn pending_notifications_skip_seen_and_duplicate_keys() {
        let alerts = [
            expiry(1, Some(1)),
            expiry(1, Some(0)),
            low_stock(1, Some(0)),
            low_stock(2, Some(0)),
            low_stock(3, Some(8)),
        ];

        let mut seen = FxHashSet::default();
        seen.insert(NotificationKey {
            product_id: ProductId(2),
            kind: AlertKind::LowStock,
        });

        let pending = pending_notifications(&alerts, &seen);

        assert_eq!(pending, [&expiry(1, Some(1)), &low_stock(1, Some(0))]);
    }

    #[test]
    fn alerts_deserialize_from_tagged_json() -> TestResult {
        let alerts: Vec<Alert> = serde_json::from_str(
            r#"[
                {"type": "expiry", "product_id": 4, "expiry_date": "2024-06-12", "days_left": 2, "source": "ocr"},
                {"type": "low_stock", "product_id": 5, "current_stock": 0, "min_stock": 10},
                {"type": "low_stock", "product_id": 6}
            ]"#,
        )?;

        assert_eq!(
            alerts,
            [
                Alert::Expiry(ExpiryAlert {
                    product_id: ProductId(4),
                    expiry_date: Some("2024-06-12".to_string()),
                    days_left: Some(2),
                }),
                Alert::LowStock(LowStockAlert {
                    product_id: ProductId(5),
                    current_stock: Some(0),
                    min_stock: Some(10),
                }),
                Alert::LowStock(LowStockAlert {
                    product_id: ProductId(6),
                    current_stock: None,
                    min_stock: None,
                }),
            ]
        );

        Ok(())
    }
}
