//! Date and time display helpers (`en-US` long form).
//!
//! The `format_*` functions never fail: input that does not parse renders
//! as an empty string so a bad value from the server degrades one label
//! instead of the page. Use the `parse_*` functions to see the error.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::macros::format_description;
use time::{Date, Time};

/// Error returned by [`parse_date`] and [`parse_time`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The input is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    /// The input is not an `HH:MM` 24-hour time.
    #[error("invalid time: {0:?}")]
    InvalidTime(String),
}

/// Parse the calendar date at the start of `raw`.
///
/// Accepts `2024-03-01`, `2024-03-01T09:15:00` and RFC 3339 timestamps; the
/// date is taken as written, without shifting into any time zone.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDate`] if no valid date leads the input.
pub fn parse_date(raw: &str) -> Result<Date, FormatError> {
    let trimmed = raw.trim();
    let date_part = trimmed.split(['T', 't', ' ']).next().unwrap_or_default();
    Date::parse(date_part, format_description!("[year]-[month]-[day]"))
        .map_err(|_| FormatError::InvalidDate(raw.to_owned()))
}

/// Parse a 24-hour `HH:MM` time. A trailing `:SS` is accepted and ignored.
///
/// # Errors
///
/// Returns [`FormatError::InvalidTime`] if the hour or minute is missing or out of range.
pub fn parse_time(raw: &str) -> Result<Time, FormatError> {
    let invalid = || FormatError::InvalidTime(raw.to_owned());
    let mut parts = raw.trim().split(':');
    let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let hour = digits(hours).ok_or_else(invalid)?;
    let minute = digits(minutes).ok_or_else(invalid)?;
    Time::from_hms(hour, minute, 0).map_err(|_| invalid())
}

/// Unsigned decimal component; signs, spaces and empty parts are rejected.
fn digits(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Render a date as `March 1, 2024`.
pub fn format_date(raw: &str) -> String {
    parse_date(raw).map_or_else(|_| String::new(), render_date)
}

/// Render a 24-hour time as `9:15 AM`.
pub fn format_time(raw: &str) -> String {
    parse_time(raw).map_or_else(|_| String::new(), render_time)
}

/// Render `"<date> at <time>"`, e.g. `March 1, 2024 at 9:15 AM`.
pub fn format_date_time(date: &str, time: &str) -> String {
    format!("{} at {}", format_date(date), format_time(time))
}

fn render_date(date: Date) -> String {
    format!("{} {}, {}", date.month(), date.day(), date.year())
}

fn render_time(time: Time) -> String {
    let hour = time.hour();
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{:02} {suffix}", time.minute())
}
