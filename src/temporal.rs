// ⏰ Temporal Helpers - Calendar-date approach times
// NASA close-approach times look like "2020-Jan-01 12:30": minute precision, no seconds.

use crate::error::{ModelError, ModelResult};
use chrono::{NaiveDate, NaiveDateTime};

// ============================================================================
// FORMATS
// ============================================================================

/// Layout of the `cd` field in the close-approach data
pub const CD_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Layout accepted for calendar dates in queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Parse a calendar-date string ("2020-Jan-01 12:30") into a date-time
pub fn cd_to_datetime(calendar_date: &str) -> ModelResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(calendar_date.trim(), CD_FORMAT).map_err(|source| {
        ModelError::InvalidTime {
            value: calendar_date.to_string(),
            source,
        }
    })
}

/// Format a date-time back to the calendar-date layout, dropping seconds
pub fn datetime_to_str(time: &NaiveDateTime) -> String {
    time.format(CD_FORMAT).to_string()
}

/// Parse a plain `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> ModelResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|source| ModelError::InvalidTime {
        value: date.to_string(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================
