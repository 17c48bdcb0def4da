//! Calendar date handling for the query routes.
//!
//! Measurement dates are stored as `YYYY-MM-DD` text, so every bound handed to
//! SQLite is rendered in that same shape and compared lexically.

use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Length of the "last 12 months" window, counted back from the newest measurement.
pub const LOOKBACK_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Shape(String),
    #[error("not a calendar date {0:?}: {1}")]
    Calendar(String, String),
    #[error("date segment could not be decoded: {0}")]
    Undecodable(String),
}

/// Parses a `YYYY-MM-DD` date, rejecting anything not shaped exactly like that.
///
/// `2017-1-1`, `2017/01/01` and `+2017-01-01` all fail even though a lenient
/// parser could read them.
pub fn parse_date(raw: &str) -> Result<Date, Error> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(Error::Shape(raw.to_string()));
    }

    Date::parse(raw, DATE_FORMAT).map_err(|e| Error::Calendar(raw.to_string(), e.to_string()))
}

/// Renders a date the way the measurement table stores it.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

/// Start of the "last 12 months" window ending at `latest`.
pub fn year_before(latest: Date) -> Date {
    latest.saturating_sub(Duration::days(LOOKBACK_DAYS))
}
