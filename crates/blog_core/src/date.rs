use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// `strftime` pattern for publication dates: `19 Apr 2021`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Offset without a colon, as emitted by the CMS (`2021-04-19T10:00:00+0000`).
const COMPACT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized publication timestamp {raw:?}")]
pub struct DateFormatError {
    pub raw: String,
}

/// Formats a raw publication timestamp as a display date in UTC.
///
/// Accepts RFC 3339, the compact `+0000` offset form and bare `YYYY-MM-DD`.
pub fn format_publication_date(raw: &str) -> Result<String, DateFormatError> {
    let trimmed = raw.trim();
    let date = parse_timestamp(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
        .ok_or_else(|| DateFormatError {
            raw: raw.to_string(),
        })?;
    Ok(date.format(DISPLAY_DATE_FORMAT).to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, COMPACT_OFFSET_FORMAT))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
