//! Read-only views over a parsed [`ThreadDump`](crate::models::ThreadDump).
//!
//! - [`status_histogram`] - Threads per status
//! - [`contended_locks`] - Locks other threads are waiting on, busiest first
//! - [`group_by_stack`] - Threads sharing an identical stack

pub mod contention;
pub mod grouping;
pub mod summary;

pub use contention::{LockContention, contended_locks};
pub use grouping::{StackGroup, group_by_stack};
pub use summary::status_histogram;
