//! Dates
//!
//! Calendar-date parsing and day arithmetic. Every comparison happens at day
//! granularity: any time-of-day component is dropped before subtracting.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use thiserror::Error;

/// Text shown in place of a date that could not be parsed.
pub const INVALID_DATE_LABEL: &str = "Invalid date";

/// `strftime` format used when displaying dates, e.g. `Mar 01, 2024`.
pub const DISPLAY_FORMAT: &str = "%b %d, %Y";

/// Day-first and month-first layouts accepted after the ISO forms, tried in order.
const FALLBACK_FORMATS: [&str; 2] = ["%d/%m/%Y", "%m/%d/%Y"];

/// Errors produced while interpreting calendar dates.
#[derive(Debug, Error)]
pub enum DateError {
    /// The input could not be parsed as a calendar date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// The day difference between two dates could not be represented.
    #[error("date difference out of range: {0}")]
    OutOfRange(#[source] jiff::Error),
}

/// Anything that can be reduced to a calendar date.
pub trait ToCalendarDate {
    /// Reduce `self` to a calendar date, discarding any time of day.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if the value does not describe a date.
    fn to_calendar_date(&self) -> Result<Date, DateError>;
}

impl ToCalendarDate for Date {
    fn to_calendar_date(&self) -> Result<Date, DateError> {
        Ok(*self)
    }
}

impl ToCalendarDate for DateTime {
    fn to_calendar_date(&self) -> Result<Date, DateError> {
        Ok(self.date())
    }
}

impl ToCalendarDate for str {
    fn to_calendar_date(&self) -> Result<Date, DateError> {
        parse_date(self)
    }
}

impl ToCalendarDate for String {
    fn to_calendar_date(&self) -> Result<Date, DateError> {
        parse_date(self)
    }
}

impl<T: ToCalendarDate + ?Sized> ToCalendarDate for &T {
    fn to_calendar_date(&self) -> Result<Date, DateError> {
        (**self).to_calendar_date()
    }
}

/// Parse a calendar date from text.
///
/// Accepted forms, tried in this order:
/// - `2024-03-01T23:30:00-05:00` or `2024-03-01T10:30:00Z`, an instant with an offset,
///   converted to its UTC date (`2024-03-02` for the first)
/// - `2024-03-01`
/// - `2024-03-01T10:30:00`, a civil date-time with the time discarded
/// - `01/03/2024` (day first)
/// - `03/25/2024` (month first, only reached when day-first fails)
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] carrying the original input when no form matches.
pub fn parse_date(input: &str) -> Result<Date, DateError> {
    let trimmed = input.trim();

    // Instants go first: the civil parsers accept an offset and silently drop it.
    trimmed
        .parse::<Timestamp>()
        .ok()
        .map(|timestamp| timestamp.to_zoned(TimeZone::UTC).date())
        .or_else(|| trimmed.parse::<Date>().ok())
        .or_else(|| trimmed.parse::<DateTime>().ok().map(DateTime::date))
        .or_else(|| {
            FALLBACK_FORMATS
                .iter()
                .find_map(|format| Date::strptime(format, trimmed).ok())
        })
        .ok_or_else(|| DateError::InvalidDate(input.to_string()))
}

/// Signed number of calendar days from `today` to `target`.
///
/// Negative when `target` is in the past, zero when it is `today`.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if either argument cannot be reduced to a date.
/// Callers should treat that as "unknown", never as zero.
pub fn days_until(target: impl ToCalendarDate, today: impl ToCalendarDate) -> Result<i32, DateError> {
    let target = target.to_calendar_date()?;
    let today = today.to_calendar_date()?;

    day_difference(today, target)
}

fn day_difference(from: Date, to: Date) -> Result<i32, DateError> {
    let span = from.until(to).map_err(DateError::OutOfRange)?;

    Ok(span.get_days())
}

/// Format a date for display, or [`INVALID_DATE_LABEL`] if it cannot be parsed.
pub fn format_date(value: impl ToCalendarDate) -> String {
    value.to_calendar_date().map_or_else(
        |_err| INVALID_DATE_LABEL.to_string(),
        |date| date.strftime(DISPLAY_FORMAT).to_string(),
    )
}
