use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

static FILENAME_TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d+)\.txt$").expect("filename timestamp pattern"));

/// Extract the capture time from a dump file name such as `jstack.1700000000000.txt`
///
/// The digits are Unix epoch milliseconds. Names without the suffix, or with a value
/// chrono cannot represent, yield `None`.
pub fn capture_date_from_filename(filename: &str) -> Option<DateTime<Utc>> {
    let caps = FILENAME_TIMESTAMP_RE.captures(filename)?;
    let millis: i64 = caps.get(1)?.as_str().parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}
