//! Line classifier for thread dump text.
//!
//! Each line is classified exactly once into a [`LineRecord`]. The record grammar:
//!
//! ```text
//! banner      := "Full thread dump" ...
//! header      := '"' name '"' (ws token)+          tokens: #seq daemon prio=N tid=T nid=N
//! deadlock    := "Found ... deadlock" | "Java stack information for the threads listed above:"
//! frame       := ws "at " frame-text
//! state       := ... "Thread.State:" ws token ...
//! sync-status := ws "- " verb ws "<" lock-id ">" [ws "(a " class ")"]
//! held-lock   := ws "- <" lock-id ">" ws "(a " class ")"
//! ignorable   := blank | "Locked ownable synchronizers:" | "- None" | "JNI global ..."
//! ```
//!
//! Anything else is [`LineRecord::Unrecognized`]; classification never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ThreadHeader;

static THREAD_STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Thread\.State:\s*(\S*)").expect("thread state pattern"));

// One pattern covers both sync-status (verb present) and held-lock (verb empty) lines
static LOCK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s+(?P<verb>[^<]*?)\s*<(?P<id>[^>]*)>(?:\s+\(a (?P<class>[^)]+)\))?")
        .expect("lock line pattern")
});

const BANNER_PREFIX: &str = "Full thread dump";

const IGNORABLE_MARKERS: &[&str] = &["Locked ownable synchronizers:", "- None"];

const IGNORABLE_PREFIXES: &[&str] = &["JNI global references:", "JNI global refs:"];

const DEADLOCK_STACKS_MARKER: &str = "Java stack information for the threads listed above";

/// Verb of a `- <verb> <id> (a class)` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncVerb<'a> {
    WaitingOn,
    ParkingToWaitFor,
    WaitingToLock,
    Locked,
    Eliminated,
    /// Structurally valid line with a verb outside the known set
    Other(&'a str),
}

impl<'a> SyncVerb<'a> {
    fn from_text(verb: &'a str) -> Self {
        match verb {
            "waiting on" => SyncVerb::WaitingOn,
            "parking to wait for" => SyncVerb::ParkingToWaitFor,
            "waiting to lock" => SyncVerb::WaitingToLock,
            "locked" => SyncVerb::Locked,
            "eliminated" => SyncVerb::Eliminated,
            other => SyncVerb::Other(other),
        }
    }

    /// Verbs that make the current thread wait on the named lock
    pub fn is_wait(self) -> bool {
        matches!(self, SyncVerb::WaitingOn | SyncVerb::ParkingToWaitFor | SyncVerb::WaitingToLock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRecord<'a> {
    Banner(&'a str),
    /// Start of the deadlock report jstack appends after the last thread
    DeadlockReport,
    ThreadHeader(ThreadHeader),
    StackFrame(&'a str),
    ThreadState(&'a str),
    SyncStatus {
        verb: SyncVerb<'a>,
        lock_id: &'a str,
        /// Absent for targets such as `<no object reference available>`
        class_name: Option<&'a str>,
    },
    HeldLock {
        lock_id: &'a str,
        class_name: &'a str,
    },
    Ignorable,
    Unrecognized,
}

/// Classify a single line of dump text
pub fn classify_line(line: &str) -> LineRecord<'_> {
    let line = line.trim_end();
    let body = line.trim_start();

    if body.is_empty() {
        return LineRecord::Ignorable;
    }

    if line.starts_with('"') {
        return match parse_thread_header(line) {
            Some(header) => LineRecord::ThreadHeader(header),
            None => LineRecord::Unrecognized,
        };
    }

    if line.starts_with(BANNER_PREFIX) {
        return LineRecord::Banner(line);
    }

    if is_deadlock_marker(body) {
        return LineRecord::DeadlockReport;
    }

    let indented = body.len() < line.len();
    if indented && let Some(frame) = body.strip_prefix("at ") {
        return LineRecord::StackFrame(frame);
    }

    if let Some(caps) = THREAD_STATE_RE.captures(line) {
        let token = caps.get(1).map_or("", |m| m.as_str());
        return LineRecord::ThreadState(token);
    }

    if IGNORABLE_MARKERS.contains(&body) || IGNORABLE_PREFIXES.iter().any(|p| body.starts_with(p))
    {
        return LineRecord::Ignorable;
    }

    if let Some(caps) = LOCK_LINE_RE.captures(line) {
        let verb = caps.name("verb").map_or("", |m| m.as_str());
        let lock_id = caps.name("id").map_or("", |m| m.as_str());
        let class_name = caps.name("class").map(|m| m.as_str());

        return match (verb.is_empty(), class_name) {
            (false, _) => {
                LineRecord::SyncStatus { verb: SyncVerb::from_text(verb), lock_id, class_name }
            }
            (true, Some(class_name)) => LineRecord::HeldLock { lock_id, class_name },
            (true, None) => LineRecord::Unrecognized,
        };
    }

    LineRecord::Unrecognized
}

/// Parse a `"name" #12 daemon prio=5 os_prio=0 tid=0x... nid=0x1a03 ...` header
///
/// Returns `None` when the closing quote is missing or no attribute follows the name.
/// The deadlock report's `"Thread-0":` references are not headers.
fn parse_thread_header(line: &str) -> Option<ThreadHeader> {
    let after_quote = line.strip_prefix('"')?;
    // Names may contain quotes themselves; the attribute tail never does
    let close = after_quote.rfind('"')?;
    let name = &after_quote[..close];
    let rest = &after_quote[close + 1..];

    if !rest.starts_with(char::is_whitespace) || rest.trim().is_empty() {
        return None;
    }

    let mut header = ThreadHeader { name: name.to_string(), ..Default::default() };

    for token in rest.split_whitespace() {
        if token == "daemon" {
            header.daemon = true;
        } else if let Some(seq) = token.strip_prefix('#') {
            header.sequence = seq.parse().ok();
        } else if let Some(prio) = token.strip_prefix("prio=") {
            header.priority = prio.parse().ok();
        } else if let Some(tid) = token.strip_prefix("tid=") {
            header.tid = Some(tid.to_string());
        } else if let Some(nid) = token.strip_prefix("nid=") {
            header.nid = parse_nid(nid);
        }
    }

    Some(header)
}

/// `Found one Java-level deadlock:`, `Found 2 deadlocks.` and the stack section heading
fn is_deadlock_marker(body: &str) -> bool {
    (body.starts_with("Found ") && body.contains("deadlock"))
        || body.starts_with(DEADLOCK_STACKS_MARKER)
}

/// `nid` is hexadecimal when `0x`-prefixed, decimal otherwise
fn parse_nid(raw: &str) -> Option<u64> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
