//! Thread Dump Analyzer - Parse JVM thread dumps into a graph of threads and locks
//!
//! This library turns the text of a thread dump (as printed by `jstack` or `kill -3`)
//! into a structured model. It supports:
//!
//! - Classifying dump lines: thread headers, frames, states, lock lines
//! - Deduplicating locks by identity within a dump
//! - Linking threads to the locks they hold and the lock they wait on
//! - Inferring the wait target of parked threads whose dump text omits it
//! - Loading dumps from disk, one at a time or a whole directory in parallel
//!
//! # Example
//!
//! ```
//! use thread_dump_analyzer::parse_thread_dump;
//!
//! let text = "\"main\" nid=0x1\n   java.lang.Thread.State: RUNNABLE\n";
//! let dump = parse_thread_dump(text, "jstack.1700000000000.txt");
//! println!("{} threads, {} locks", dump.threads.len(), dump.locks.len());
//! ```

pub mod analysis;
pub mod cli;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use loader::{discover_dumps, load_dumps, read_dump_file};
pub use models::{Lock, Thread, ThreadDump, ThreadStatus};
pub use parsers::parse_thread_dump;
