//! Report
//!
//! Renders a [`Snapshot`] as terminal tables or as a JSON document. Both
//! renderings are built from the same rows.

use std::{cmp::Ordering, io};

use jiff::civil::Date;
use serde::Serialize;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    alerts::{Alert, AlertFilter, AlertKind, Severity},
    dates::{INVALID_DATE_LABEL, format_date},
    expiry::{DEFAULT_EXPIRING_SOON_DAYS, ExpiryRecord, ExpiryStatus},
    forecasts::{ForecastOrder, rank_forecasts},
    products::ProductCatalog,
    snapshot::{DashboardSummary, Snapshot},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// The report could not be encoded as JSON.
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to include in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Width of the expiring-soon window in days
    pub window_days: i32,

    /// Which alerts to list
    pub alert_filter: AlertFilter,

    /// Restrict forecasts to one product category
    pub category: Option<String>,

    /// Forecast ordering
    pub forecast_order: ForecastOrder,

    /// Maximum number of forecasts to list
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_EXPIRING_SOON_DAYS,
            alert_filter: AlertFilter::default(),
            category: None,
            forecast_order: ForecastOrder::default(),
            top: 10,
        }
    }
}

/// One listed alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    /// Product label
    pub product: String,

    /// Alert kind
    pub kind: AlertKind,

    /// Alert severity
    pub severity: Severity,

    /// One-line title
    pub title: String,

    /// Days left or stock figures
    pub detail: String,
}

/// One expiry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryRow {
    /// Record identifier
    pub id: u32,

    /// Product label
    pub product: String,

    /// Display form of the expiry date
    pub expiry_date: String,

    /// Days left, absent when the date is invalid
    pub days_left: Option<i32>,

    /// Status, absent when the date is invalid
    pub status: Option<ExpiryStatus>,

    /// Whether the record is dated within `[today, today + window]`
    pub within_window: bool,
}

/// One ranked forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    /// Product label
    pub product: String,

    /// Product category, if known
    pub category: Option<String>,

    /// Forecast demand
    pub forecast: f64,
}

/// A rendered view over a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Headline figures
    pub summary: DashboardSummary,

    /// Alerts passing the filter
    pub alerts: Vec<AlertRow>,

    /// Expiry records, soonest first, unparseable dates last
    pub expiry: Vec<ExpiryRow>,

    /// Ranked forecasts
    pub forecasts: Vec<ForecastRow>,
}

impl Report {
    /// Build the report for `today`.
    pub fn new(snapshot: &Snapshot, today: Date, options: &ReportOptions) -> Self {
        let catalog = snapshot.catalog();

        Self {
            summary: snapshot.summary(today, options.window_days),
            alerts: alert_rows(&snapshot.alerts, &catalog, options.alert_filter),
            expiry: expiry_rows(&snapshot.expiry, &catalog, today, options.window_days),
            forecasts: forecast_rows(snapshot, &catalog, options),
        }
    }

    /// Write the report as terminal tables.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        writeln!(out, "Inventory report for {}", format_date(self.summary.today))?;
        writeln!(out, "\n{}", summary_table(&self.summary))?;

        writeln!(out, "\nAlerts")?;
        if self.alerts.is_empty() {
            writeln!(out, "No alerts match the current filters.")?;
        } else {
            writeln!(out, "{}", self.alert_table())?;
        }

        writeln!(out, "\nExpiry")?;
        if self.expiry.is_empty() {
            writeln!(out, "No expiry records.")?;
        } else {
            writeln!(out, "{}", self.expiry_table())?;
        }

        writeln!(out, "\nForecasts")?;
        if self.forecasts.is_empty() {
            writeln!(out, "No forecasts available.")?;
        } else {
            writeln!(out, "{}", self.forecast_table())?;
        }

        Ok(())
    }

    /// Write the report as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if encoding or writing fails.
    pub fn write_json(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;

        Ok(())
    }

    fn alert_table(&self) -> Table {
        let mut builder = Builder::default();

        builder.push_record(["Product", "Type", "Severity", "Alert", "Detail"]);

        for row in &self.alerts {
            builder.push_record([
                row.product.clone(),
                row.kind.to_string(),
                row.severity.to_string(),
                row.title.clone(),
                row.detail.clone(),
            ]);
        }

        styled(builder.build())
    }

    fn expiry_table(&self) -> Table {
        let mut builder = Builder::default();

        builder.push_record(["#", "Product", "Expires", "Days Left", "Status"]);

        for row in &self.expiry {
            builder.push_record([
                row.id.to_string(),
                row.product.clone(),
                row.expiry_date.clone(),
                row.days_left.map_or_else(String::new, |days| days.to_string()),
                row.status
                    .map_or_else(|| INVALID_DATE_LABEL.to_string(), |status| status.to_string()),
            ]);
        }

        let mut table = styled(builder.build());
        table.modify(Columns::new(3..4), Alignment::right());

        table
    }

    fn forecast_table(&self) -> Table {
        let mut builder = Builder::default();

        builder.push_record(["Product", "Category", "Forecast"]);

        for row in &self.forecasts {
            builder.push_record([
                row.product.clone(),
                row.category.clone().unwrap_or_default(),
                format!("{:.1}", row.forecast),
            ]);
        }

        let mut table = styled(builder.build());
        table.modify(Columns::new(2..3), Alignment::right());

        table
    }
}

fn summary_table(summary: &DashboardSummary) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Products".to_string(), summary.total_products.to_string()]);
    builder.push_record(["Alerts".to_string(), summary.alerts.total.to_string()]);
    builder.push_record(["Critical alerts".to_string(), summary.alerts.critical.to_string()]);
    builder.push_record(["Warning alerts".to_string(), summary.alerts.warning.to_string()]);
    builder.push_record([
        format!("Expiring within {} days", summary.window_days),
        summary.expiring_within_window.to_string(),
    ]);
    builder.push_record(["Expired".to_string(), summary.expiry.expired.to_string()]);
    builder.push_record(["Invalid dates".to_string(), summary.expiry.invalid.to_string()]);
    builder.push_record(["Forecasts".to_string(), summary.forecasts.count.to_string()]);
    builder.push_record([
        "Average forecast".to_string(),
        format!("{:.1}", summary.forecasts.average),
    ]);
    builder.push_record([
        "Highest forecast".to_string(),
        format!("{:.1}", summary.forecasts.max),
    ]);
    builder.push_record([
        "Lowest forecast".to_string(),
        format!("{:.1}", summary.forecasts.min),
    ]);

    let mut table = styled(builder.build());
    table.modify(Columns::new(1..2), Alignment::right());

    table
}

fn styled(mut table: Table) -> Table {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    table
}

fn alert_rows(alerts: &[Alert], catalog: &ProductCatalog<'_>, filter: AlertFilter) -> Vec<AlertRow> {
    filter
        .apply(alerts)
        .into_iter()
        .map(|alert| AlertRow {
            product: catalog.label(alert.product_id()).into_owned(),
            kind: alert.kind(),
            severity: alert.severity(),
            title: alert.title(catalog),
            detail: alert_detail(alert),
        })
        .collect()
}

fn alert_detail(alert: &Alert) -> String {
    match alert {
        Alert::Expiry(expiry) => match (expiry.days_left, expiry.expiry_date.as_deref()) {
            (Some(days), Some(date)) => format!("Days left: {days} ({})", format_date(date)),
            (Some(days), None) => format!("Days left: {days}"),
            (None, Some(date)) => format!("Expires {}", format_date(date)),
            (None, None) => String::new(),
        },
        Alert::LowStock(stock) => match (stock.current_stock, stock.min_stock) {
            (Some(current), Some(min)) => format!("Stock: {current} (min {min})"),
            (Some(current), None) => format!("Stock: {current}"),
            (None, Some(min)) => format!("Min stock: {min}"),
            (None, None) => String::new(),
        },
    }
}

fn expiry_rows(
    records: &[ExpiryRecord],
    catalog: &ProductCatalog<'_>,
    today: Date,
    window_days: i32,
) -> Vec<ExpiryRow> {
    let mut rows: Vec<ExpiryRow> = records
        .iter()
        .map(|record| ExpiryRow {
            id: record.id,
            product: catalog.label(record.product_id).into_owned(),
            expiry_date: format_date(&record.expiry_date),
            days_left: record.days_left(today).ok(),
            status: record.status(today, window_days).ok(),
            within_window: record.within_window(today, window_days),
        })
        .collect();

    rows.sort_by(|a, b| match (a.days_left, b.days_left) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    rows
}

fn forecast_rows(
    snapshot: &Snapshot,
    catalog: &ProductCatalog<'_>,
    options: &ReportOptions,
) -> Vec<ForecastRow> {
    rank_forecasts(
        &snapshot.forecasts,
        catalog,
        options.category.as_deref(),
        options.forecast_order,
    )
    .top(options.top)
    .map(|forecast| ForecastRow {
        product: catalog.label(forecast.product_id).into_owned(),
        category: catalog.category(forecast.product_id).map(str::to_string),
        forecast: forecast.forecast,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::{
        alerts::{ExpiryAlert, LowStockAlert, SeverityFilter},
        forecasts::Forecast,
        products::{Product, ProductId},
    };

    fn snapshot() -> Snapshot {
        Snapshot {
            products: vec![
                Product {
                    id: ProductId(1),
                    name: "Whole Milk".to_string(),
                    barcode: "5000112637922".to_string(),
                    category: Some("Dairy".to_string()),
                    min_stock: Some(5),
                    max_stock: Some(40),
                },
                Product {
                    id: ProductId(2),
                    name: "Sourdough".to_string(),
                    barcode: "40084107".to_string(),
                    category: Some("Bakery".to_string()),
                    min_stock: None,
                    max_stock: None,
                },
            ],
            expiry: vec![
                ExpiryRecord {
                    id: 1,
                    product_id: ProductId(1),
                    expiry_date: "2024-06-20".to_string(),
                    detected_text: None,
                    image_path: None,
                    quantity: None,
                },
                ExpiryRecord {
                    id: 2,
                    product_id: ProductId(9),
                    expiry_date: "blurry".to_string(),
                    detected_text: None,
                    image_path: None,
                    quantity: None,
                },
                ExpiryRecord {
                    id: 3,
                    product_id: ProductId(2),
                    expiry_date: "2024-06-10".to_string(),
                    detected_text: None,
                    image_path: None,
                    quantity: None,
                },
            ],
            alerts: vec![
                Alert::Expiry(ExpiryAlert {
                    product_id: ProductId(2),
                    expiry_date: Some("2024-06-10".to_string()),
                    days_left: Some(0),
                }),
                Alert::LowStock(LowStockAlert {
                    product_id: ProductId(1),
                    current_stock: Some(3),
                    min_stock: Some(5),
                }),
            ],
            forecasts: vec![
                Forecast {
                    product_id: ProductId(1),
                    forecast: 18.0,
                },
                Forecast {
                    product_id: ProductId(2),
                    forecast: 30.0,
                },
            ],
        }
    }

    #[test]
    fn expiry_rows_are_sorted_with_invalid_last() {
        let report = Report::new(&snapshot(), date(2024, 6, 10), &ReportOptions::default());

        let ids: Vec<u32> = report.expiry.iter().map(|row| row.id).collect();

        assert_eq!(ids, [3, 1, 2]);
        assert_eq!(
            report.expiry.last().map(|row| (row.status, row.expiry_date.as_str())),
            Some((None, INVALID_DATE_LABEL))
        );
        assert_eq!(
            report.expiry.first().map(|row| (row.status, row.within_window)),
            Some((Some(ExpiryStatus::Good), true))
        );
    }

    #[test]
    fn within_window_is_decided_per_record_even_when_ids_repeat() {
        let snapshot = Snapshot {
            expiry: vec![
                ExpiryRecord {
                    id: 1,
                    product_id: ProductId(1),
                    expiry_date: "2024-06-11".to_string(),
                    detected_text: None,
                    image_path: None,
                    quantity: Some(4),
                },
                ExpiryRecord {
                    id: 1,
                    product_id: ProductId(2),
                    expiry_date: "2024-09-01".to_string(),
                    detected_text: Some("EXP 01/09/2024".to_string()),
                    image_path: Some("uploads/ocr/1.jpg".to_string()),
                    quantity: None,
                },
            ],
            ..Snapshot::default()
        };

        let report = Report::new(&snapshot, date(2024, 6, 10), &ReportOptions::default());

        let flags: Vec<(Option<i32>, bool)> = report
            .expiry
            .iter()
            .map(|row| (row.days_left, row.within_window))
            .collect();

        assert_eq!(flags, [(Some(1), true), (Some(83), false)]);
    }

    #[test]
    fn alert_rows_follow_filter() {
        let options = ReportOptions {
            alert_filter: AlertFilter {
                kind: None,
                severity: Some(SeverityFilter::Critical),
            },
            ..ReportOptions::default()
        };

        let report = Report::new(&snapshot(), date(2024, 6, 10), &options);

        assert_eq!(
            report.alerts,
            [AlertRow {
                product: "Sourdough".to_string(),
                kind: AlertKind::Expiry,
                severity: Severity::Critical,
                title: "Sourdough - Expired".to_string(),
                detail: "Days left: 0 (Jun 10, 2024)".to_string(),
            }]
        );
    }

    #[test]
    fn forecast_rows_respect_category_and_top() {
        let options = ReportOptions {
            category: Some("Dairy".to_string()),
            top: 5,
            ..ReportOptions::default()
        };

        let report = Report::new(&snapshot(), date(2024, 6, 10), &options);

        assert_eq!(
            report.forecasts,
            [ForecastRow {
                product: "Whole Milk".to_string(),
                category: Some("Dairy".to_string()),
                forecast: 18.0,
            }]
        );
    }

    #[test]
    fn write_to_renders_all_sections() -> TestResult {
        let report = Report::new(&snapshot(), date(2024, 6, 10), &ReportOptions::default());
        let mut out = Vec::new();

        report.write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Inventory report for Jun 10, 2024"));
        assert!(text.contains("Sourdough - Expired"));
        assert!(text.contains("Whole Milk - Low stock"));
        assert!(text.contains("Product 9"));
        assert!(text.contains(INVALID_DATE_LABEL));
        assert!(text.contains("30.0"));

        Ok(())
    }

    #[test]
    fn write_to_reports_empty_sections() -> TestResult {
        let report = Report::new(&Snapshot::default(), date(2024, 6, 10), &ReportOptions::default());
        let mut out = Vec::new();

        report.write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("No alerts match the current filters."));
        assert!(text.contains("No expiry records."));
        assert!(text.contains("No forecasts available."));

        Ok(())
    }

    #[test]
    fn write_json_emits_summary_and_rows() -> TestResult {
        let report = Report::new(&snapshot(), date(2024, 6, 10), &ReportOptions::default());
        let mut out = Vec::new();

        report.write_json(&mut out)?;

        let value: serde_json::Value = serde_json::from_slice(&out)?;

        assert_eq!(value.pointer("/summary/today"), Some(&json!("2024-06-10")));
        assert_eq!(value.pointer("/summary/alerts/critical"), Some(&json!(1)));
        assert_eq!(value.pointer("/alerts/1/kind"), Some(&json!("low_stock")));
        assert_eq!(value.pointer("/expiry/2/status"), Some(&json!(null)));

        Ok(())
    }
}
