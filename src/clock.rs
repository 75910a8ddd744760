//! Wall-clock helpers producing the date strings records store.

use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// Today's date in UTC.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Current instant as an RFC 3339 timestamp.
#[must_use]
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

/// `YYYY-MM-DD` for `date`.
#[must_use]
pub fn iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
