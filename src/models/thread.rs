use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::LockRef;

/// Index of a [`Thread`] inside its owning [`ThreadDump`](super::ThreadDump)
///
/// Serialized as the bare index; see [`ThreadDump::check_references`](super::ThreadDump::check_references).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadRef(pub(crate) usize);

impl ThreadRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle status of a thread as reported by the `Thread.State:` line
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreadStatus {
    Runnable,
    Blocked,
    Waiting,
    TimedWaiting,
    New,
    Terminated,
    #[default]
    Unknown,
}

impl ThreadStatus {
    /// Statuses in which a thread is expected to be parked on some lock
    pub fn is_parked(self) -> bool {
        matches!(self, ThreadStatus::Blocked | ThreadStatus::Waiting | ThreadStatus::TimedWaiting)
    }
}

/// Fields captured from a thread header line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadHeader {
    pub name: String,
    /// Native thread id from `nid=`, absent if the header carries none
    pub nid: Option<u64>,
    #[serde(default)]
    pub daemon: bool,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub tid: Option<String>,
    /// `#<n>` sequence number printed by newer JVMs
    #[serde(default)]
    pub sequence: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub name: String,
    pub nid: Option<u64>,
    pub daemon: bool,
    pub priority: Option<i32>,
    pub tid: Option<String>,
    pub sequence: Option<u64>,
    pub status: ThreadStatus,
    /// Frames in source order, outermost call first as printed
    pub frames: Vec<String>,
    /// Every lock this thread owns, in acquisition order as encountered
    pub held_locks: Vec<LockRef>,
    /// Monitor locks only; always a subset of `held_locks`
    pub classical_locks: Vec<LockRef>,
    pub waiting_on: Option<LockRef>,
}

impl Thread {
    pub fn new(header: ThreadHeader) -> Self {
        Self {
            name: header.name,
            nid: header.nid,
            daemon: header.daemon,
            priority: header.priority,
            tid: header.tid,
            sequence: header.sequence,
            status: ThreadStatus::Unknown,
            frames: Vec::new(),
            held_locks: Vec::new(),
            classical_locks: Vec::new(),
            waiting_on: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_on.is_some()
    }

    pub fn holds(&self, lock: LockRef) -> bool {
        self.held_locks.contains(&lock)
    }

    /// Top of the stack (the frame currently executing), if any
    pub fn top_frame(&self) -> Option<&str> {
        self.frames.first().map(String::as_str)
    }
}
