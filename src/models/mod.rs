//! Data models for a parsed thread dump.
//!
//! This module defines the structures produced by the parser:
//!
//! - [`ThreadDump`] - One parsed dump: capture date, threads in source order, unique locks
//! - [`Thread`] - A thread's identity, status, stack frames and lock relationships
//! - [`Lock`] - A lock object, deduplicated by its identity key within one dump
//! - [`ThreadRef`] / [`LockRef`] - Typed indices into the dump's thread and lock arenas
//!
//! The dump owns every thread and lock. Threads and locks refer to each other only through
//! the typed indices, so nothing can outlive or dangle from the dump that created it.

pub mod dump;
pub mod lock;
pub mod thread;

pub use dump::{ParseStats, ThreadDump};
pub use lock::{Lock, LockRef};
pub use thread::{Thread, ThreadHeader, ThreadRef, ThreadStatus};
