//! Expiry
//!
//! Status classification for dated stock. Two windows are in play and they
//! disagree at `today`:
//!
//! - [`is_expiring_soon`] is exclusive at the lower end: a record dated today
//!   is neither expired nor "expiring soon".
//! - [`filter_expiring_within`] is inclusive at both ends: a record dated today
//!   is listed among the records expiring within the window.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    dates::{DateError, ToCalendarDate, days_until},
    products::ProductId,
};

/// Default width, in days, of the "expiring soon" window.
pub const DEFAULT_EXPIRING_SOON_DAYS: i32 = 7;

/// A dated batch of a product on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryRecord {
    /// Record identifier
    pub id: u32,

    /// Product the batch belongs to. Not guaranteed to resolve.
    pub product_id: ProductId,

    /// Expiry date as supplied; may be malformed.
    pub expiry_date: String,

    /// Text read from the label by OCR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_text: Option<String>,

    /// Path of the scanned label image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Units in the batch, for manually entered records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ExpiryRecord {
    /// Days from `today` until this record expires.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if the expiry date cannot be parsed.
    pub fn days_left(&self, today: Date) -> Result<i32, DateError> {
        days_until(&self.expiry_date, today)
    }

    /// Classify this record, see [`classify_expiry`].
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if the expiry date cannot be parsed.
    pub fn status(&self, today: Date, window_days: i32) -> Result<ExpiryStatus, DateError> {
        classify_expiry(&self.expiry_date, today, window_days)
    }

    /// Whether this record is dated within `[today, today + window_days]`.
    ///
    /// Unlike [`is_expiring_soon`], a record dated today is inside the window.
    /// Unparseable dates are never inside it.
    pub fn within_window(&self, today: Date, window_days: i32) -> bool {
        self.days_left(today)
            .is_ok_and(|days| (0..=window_days).contains(&days))
    }
}

/// Expiry status of a dated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// The date is in the past.
    Expired,

    /// The date is after today and within the window.
    ExpiringSoon,

    /// Everything else, including today + window + 1 and beyond.
    Good,
}

impl ExpiryStatus {
    /// Classify a day difference.
    ///
    /// Zero days (expiring today) is neither expired nor expiring soon, so it
    /// falls through to [`ExpiryStatus::Good`] here; see [`is_expired`] and
    /// [`is_expiring_soon`] for the predicates this partition is built from.
    pub fn from_days(days: i32, window_days: i32) -> Self {
        if days < 0 {
            Self::Expired
        } else if days > 0 && days <= window_days {
            Self::ExpiringSoon
        } else {
            Self::Good
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring soon",
            Self::Good => "Good",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether `target` is strictly before `today`. Unparseable dates are not expired.
pub fn is_expired(target: impl ToCalendarDate, today: impl ToCalendarDate) -> bool {
    days_until(target, today).is_ok_and(|days| days < 0)
}

/// Whether `target` falls in `(today, today + window_days]`.
///
/// Unparseable dates are never expiring soon.
pub fn is_expiring_soon(
    target: impl ToCalendarDate,
    today: impl ToCalendarDate,
    window_days: i32,
) -> bool {
    days_until(target, today).is_ok_and(|days| days > 0 && days <= window_days)
}

/// Partition a date into exactly one [`ExpiryStatus`].
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if either date cannot be parsed.
pub fn classify_expiry(
    target: impl ToCalendarDate,
    today: impl ToCalendarDate,
    window_days: i32,
) -> Result<ExpiryStatus, DateError> {
    days_until(target, today).map(|days| ExpiryStatus::from_days(days, window_days))
}

/// Records whose expiry date lies in `[today, today + window_days]`, both ends inclusive.
///
/// Records with unparseable dates are skipped.
pub fn filter_expiring_within(
    records: &[ExpiryRecord],
    today: Date,
    window_days: i32,
) -> Vec<&ExpiryRecord> {
    records
        .iter()
        .filter(|record| record.within_window(today, window_days))
        .collect()
}

/// Records belonging to `product_id`.
pub fn records_for_product(records: &[ExpiryRecord], product_id: ProductId) -> Vec<&ExpiryRecord> {
    records
        .iter()
        .filter(|record| record.product_id == product_id)
        .collect()
}

/// Count of records per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpiryBreakdown {
    /// Records already past their date
    pub expired: usize,

    /// Records expiring after today and within the window
    pub expiring_soon: usize,

    /// Records expiring today or beyond the window
    pub good: usize,

    /// Records whose date could not be parsed
    pub invalid: usize,
}

impl ExpiryBreakdown {
    /// Tally the records against `today`.
    pub fn from_records(records: &[ExpiryRecord], today: Date, window_days: i32) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut breakdown, record| {
                match record.status(today, window_days) {
                    Ok(ExpiryStatus::Expired) => breakdown.expired += 1,
                    Ok(ExpiryStatus::ExpiringSoon) => breakdown.expiring_soon += 1,
                    Ok(ExpiryStatus::Good) => breakdown.good += 1,
                    Err(_) => breakdown.invalid += 1,
                }

                breakdown
            })
    }

    /// Total number of records tallied.
    pub fn total(&self) -> usize {
        self.expired + self.expiring_soon + self.good + self.invalid
    }
}
