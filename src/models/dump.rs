use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Lock, LockRef, Thread, ThreadRef, ThreadStatus};

/// Line-level counters gathered while parsing one dump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_lines: usize,
    pub unrecognized_lines: usize,
    pub unknown_verbs: usize,
    /// Threads whose wait target was inferred rather than read from the text
    pub inferred_waits: usize,
}

/// One parsed thread dump
///
/// Threads are kept in order of appearance in the source text. Locks are unique by
/// [`Lock::id`] and kept in order of first reference.
///
/// A dump built by the parser always has in-range references. A dump deserialized some
/// other way may not; load it with [`ThreadDump::from_json`] or call
/// [`ThreadDump::check_references`] before using the accessors, which panic on a
/// dangling [`ThreadRef`] or [`LockRef`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDump {
    pub captured_at: Option<DateTime<Utc>>,
    /// The `Full thread dump ...` banner, if present
    pub jvm_info: Option<String>,
    pub threads: Vec<Thread>,
    pub locks: Vec<Lock>,
    pub stats: ParseStats,
}

impl ThreadDump {
    /// Deserialize a dump written by `summary --json` and reject dangling references
    pub fn from_json(json: &str) -> Result<Self> {
        let dump: ThreadDump = serde_json::from_str(json).context("Failed to parse dump JSON")?;
        dump.check_references()?;
        Ok(dump)
    }

    /// Verify every [`ThreadRef`] and [`LockRef`] points inside this dump
    pub fn check_references(&self) -> Result<()> {
        let thread_count = self.threads.len();
        let lock_count = self.locks.len();

        for thread in &self.threads {
            let mut locks =
                thread.held_locks.iter().chain(&thread.classical_locks).chain(&thread.waiting_on);
            if let Some(lock) = locks.find(|l| l.0 >= lock_count) {
                bail!(
                    "Thread \"{}\" refers to lock #{} but the dump has {} locks",
                    thread.name,
                    lock.0,
                    lock_count
                );
            }
        }

        for lock in &self.locks {
            let mut threads = lock.owner.iter().chain(&lock.waiters);
            if let Some(thread) = threads.find(|t| t.0 >= thread_count) {
                bail!(
                    "Lock <{}> refers to thread #{} but the dump has {} threads",
                    lock.id,
                    thread.0,
                    thread_count
                );
            }
        }

        Ok(())
    }

    pub fn thread(&self, thread: ThreadRef) -> &Thread {
        &self.threads[thread.0]
    }

    pub fn lock(&self, lock: LockRef) -> &Lock {
        &self.locks[lock.0]
    }

    pub fn find_lock(&self, id: &str) -> Option<LockRef> {
        self.locks.iter().position(|l| l.id == id).map(LockRef)
    }

    pub fn thread_refs(&self) -> impl Iterator<Item = ThreadRef> + '_ {
        (0..self.threads.len()).map(ThreadRef)
    }

    pub fn threads_with_status(&self, status: ThreadStatus) -> impl Iterator<Item = &Thread> {
        self.threads.iter().filter(move |t| t.status == status)
    }

    /// Owner of a lock, resolved to the owning thread
    pub fn owner_of(&self, lock: LockRef) -> Option<&Thread> {
        self.lock(lock).owner.map(|t| self.thread(t))
    }

    pub(crate) fn thread_mut(&mut self, thread: ThreadRef) -> &mut Thread {
        &mut self.threads[thread.0]
    }

    pub(crate) fn lock_mut(&mut self, lock: LockRef) -> &mut Lock {
        &mut self.locks[lock.0]
    }

    pub(crate) fn push_thread(&mut self, thread: Thread) -> ThreadRef {
        self.threads.push(thread);
        ThreadRef(self.threads.len() - 1)
    }

    pub(crate) fn push_lock(&mut self, lock: Lock) -> LockRef {
        self.locks.push(lock);
        LockRef(self.locks.len() - 1)
    }
}
