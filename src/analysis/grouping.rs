use std::collections::HashMap;

use serde::Serialize;

use crate::models::{ThreadDump, ThreadRef};

/// Threads that share one exact stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackGroup<'a> {
    pub frames: &'a [String],
    pub threads: Vec<ThreadRef>,
}

impl StackGroup<'_> {
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

/// Group threads by identical frame sequence
///
/// Largest group first; groups of equal size keep the order in which their first thread
/// appears. Threads with no frames form a group of their own.
pub fn group_by_stack(dump: &ThreadDump) -> Vec<StackGroup<'_>> {
    let mut groups: Vec<StackGroup<'_>> = Vec::new();
    let mut by_frames: HashMap<&[String], usize> = HashMap::new();

    for (thread_ref, thread) in dump.thread_refs().zip(&dump.threads) {
        let frames = thread.frames.as_slice();
        match by_frames.get(frames) {
            Some(&index) => groups[index].threads.push(thread_ref),
            None => {
                by_frames.insert(frames, groups.len());
                groups.push(StackGroup { frames, threads: vec![thread_ref] });
            }
        }
    }

    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}
