use serde::{Deserialize, Serialize};

use super::ThreadRef;

/// Index of a [`Lock`] inside its owning [`ThreadDump`](super::ThreadDump)
///
/// Serialized as the bare index. Deserializing does not range-check it;
/// [`ThreadDump::from_json`](super::ThreadDump::from_json) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockRef(pub(crate) usize);

impl LockRef {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Identity key taken verbatim from the dump, e.g. `0x000000076ab62208`
    pub id: String,
    pub class_name: String,
    pub owner: Option<ThreadRef>,
    pub waiters: Vec<ThreadRef>,
}

impl Lock {
    pub fn new(id: &str, class_name: &str) -> Self {
        Self { id: id.to_string(), class_name: class_name.to_string(), owner: None, waiters: Vec::new() }
    }

    pub fn is_contended(&self) -> bool {
        !self.waiters.is_empty()
    }
}
