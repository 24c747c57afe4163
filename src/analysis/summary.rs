use strum::IntoEnumIterator;

use crate::models::{ThreadDump, ThreadStatus};

/// Count threads per status, in declaration order, omitting statuses with no threads
pub fn status_histogram(dump: &ThreadDump) -> Vec<(ThreadStatus, usize)> {
    ThreadStatus::iter()
        .map(|status| (status, dump.threads_with_status(status).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}
