use std::str::FromStr;

use crate::models::ThreadStatus;

/// Map a raw `Thread.State:` token to a [`ThreadStatus`]
///
/// Exact member names win. Otherwise prefix rules apply in order: `BLOCKED`, `WAITING`,
/// `TIME_WAITING`. Anything else is [`ThreadStatus::Unknown`].
///
/// The `TIME_WAITING` rule is kept as observed even though the JVM prints
/// `TIMED_WAITING`, which the exact match already covers.
pub fn classify_status(token: &str) -> ThreadStatus {
    if let Ok(status) = ThreadStatus::from_str(token) {
        return status;
    }

    if token.starts_with("BLOCKED") {
        ThreadStatus::Blocked
    } else if token.starts_with("WAITING") {
        ThreadStatus::Waiting
    } else if token.starts_with("TIME_WAITING") {
        ThreadStatus::TimedWaiting
    } else {
        ThreadStatus::Unknown
    }
}
