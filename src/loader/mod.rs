//! Loading thread dumps from disk
//!
//! # Error Handling Strategy
//!
//! - **File-level failures** (missing, unreadable, oversized) are returned as
//!   `anyhow::Error` with context naming the file.
//!
//! - **Directory scans** degrade gracefully: unreadable entries are logged and skipped.
//!
//! - **Batch loads** report a result per file so one bad dump never hides the others.
//!
//! Content-level problems are handled by the parser itself, which never fails.

pub mod discovery;
pub mod reader;

pub use discovery::discover_dumps;
pub use reader::{load_dumps, read_dump_file};
