use serde::Serialize;

use crate::models::{LockRef, ThreadDump};

/// A lock with at least one waiter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockContention<'a> {
    pub lock: LockRef,
    pub id: &'a str,
    pub class_name: &'a str,
    pub owner: Option<&'a str>,
    pub waiters: Vec<&'a str>,
}

/// Locks that threads are waiting on, most waiters first
///
/// Ties keep the order in which locks were first referenced in the dump.
pub fn contended_locks(dump: &ThreadDump) -> Vec<LockContention<'_>> {
    let mut contended: Vec<_> = dump
        .locks
        .iter()
        .enumerate()
        .filter(|(_, lock)| lock.is_contended())
        .map(|(index, lock)| LockContention {
            lock: LockRef(index),
            id: &lock.id,
            class_name: &lock.class_name,
            owner: lock.owner.map(|t| dump.thread(t).name.as_str()),
            waiters: lock.waiters.iter().map(|&t| dump.thread(t).name.as_str()).collect(),
        })
        .collect();

    // Stable sort keeps first-reference order among equals
    contended.sort_by(|a, b| b.waiters.len().cmp(&a.waiters.len()));
    contended
}
