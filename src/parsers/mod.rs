//! Thread dump parser
//!
//! # Pipeline
//!
//! Raw text is split into lines. Each line is classified once by [`line::classify_line`]
//! into a tagged [`line::LineRecord`]. The dump assembler ([`dump::parse_thread_dump`])
//! routes each record to the current thread's [`builder::ThreadBuilder`] and to the
//! per-dump [`registry::LockRegistry`]. Once every line is consumed,
//! [`resolver::resolve_anonymous_synchronizers`] runs a single post-pass.
//!
//! # Error Handling Strategy
//!
//! Parsing is **best effort** and never fails:
//!
//! - **Unrecognized lines** and **unknown lock verbs** are logged with `log::warn!`, counted
//!   in [`ParseStats`](crate::models::ParseStats), and skipped.
//!
//! - **Lines before the first thread header** are dropped silently (`log::debug!`); dumps
//!   commonly open with a timestamp and banner.
//!
//! - **The deadlock report** jstack appends after the threads is skipped (`log::debug!`)
//!   up to the next thread header; it only repeats stacks already parsed.
//!
//! - **Parked threads with nothing to attribute** are left without a wait target.
//!
//! Errors that can actually fail (missing or oversized files) live in [`crate::loader`].

pub mod builder;
pub mod dump;
pub mod line;
pub mod registry;
pub mod resolver;
pub mod status;
pub mod timestamp;

pub use dump::parse_thread_dump;
pub use line::{LineRecord, SyncVerb, classify_line};
pub use registry::LockRegistry;
pub use resolver::resolve_anonymous_synchronizers;
pub use status::classify_status;
pub use timestamp::capture_date_from_filename;
