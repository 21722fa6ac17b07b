//! Release title formatting

use chrono::{DateTime, TimeZone};

/// Minute-precision, zero-padded timestamp used in titles and tags
pub const TITLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// Format a release title as `<prefix>-YYYY-MM-DD-HH-mm`.
///
/// The title is also the release tag, so it contains neither spaces nor `:`.
pub fn release_title<Tz: TimeZone>(prefix: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}", prefix, timestamp.format(TITLE_TIMESTAMP_FORMAT))
}
