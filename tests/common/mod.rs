//! Shared test utilities for building synthetic thread dumps
//!
//! Provides builder patterns for creating dump text without hand-writing every line.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thread_dump_analyzer::models::ThreadDump;

/// Builder for a whole dump document
pub struct DumpBuilder {
    preamble: Vec<String>,
    threads: Vec<ThreadBuilder>,
    jni_footer: bool,
}

impl DumpBuilder {
    /// Create an empty dump with the usual timestamp and JVM banner
    pub fn new() -> Self {
        Self {
            preamble: vec![
                "2024-01-15 10:30:00".to_string(),
                "Full thread dump OpenJDK 64-Bit Server VM (17.0.2+8-86 mixed mode, sharing):"
                    .to_string(),
            ],
            threads: Vec::new(),
            jni_footer: true,
        }
    }

    /// Create a dump with no preamble or footer at all
    pub fn bare() -> Self {
        Self { preamble: Vec::new(), threads: Vec::new(), jni_footer: false }
    }

    /// Add a thread section
    pub fn with_thread(mut self, thread: ThreadBuilder) -> Self {
        self.threads.push(thread);
        self
    }

    /// Render to dump text
    pub fn build(&self) -> String {
        let mut lines = self.preamble.clone();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        for thread in &self.threads {
            lines.extend(thread.lines());
            lines.push(String::new());
        }
        if self.jni_footer {
            lines.push("JNI global refs: 15, weak refs: 0".to_string());
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Write the dump into `dir` under `filename`, returning its path
    pub fn write_to(&self, dir: &Path, filename: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, self.build()).expect("Failed to write dump file");
        path
    }
}

impl Default for DumpBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one thread section; body lines keep the order they were added in
pub struct ThreadBuilder {
    name: String,
    nid: u64,
    daemon: bool,
    state: Option<String>,
    body: Vec<String>,
    ownable: Vec<(String, String)>,
}

impl ThreadBuilder {
    pub fn new(name: &str, nid: u64) -> Self {
        Self {
            name: name.to_string(),
            nid,
            daemon: false,
            state: None,
            body: Vec::new(),
            ownable: Vec::new(),
        }
    }

    pub fn daemon(mut self) -> Self {
        self.daemon = true;
        self
    }

    /// Set the `java.lang.Thread.State:` line, e.g. `"WAITING (on object monitor)"`
    pub fn state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    pub fn frame(mut self, frame: &str) -> Self {
        self.body.push(format!("\tat {}", frame));
        self
    }

    pub fn waiting_on(self, id: &str, class: &str) -> Self {
        self.lock_line("waiting on", id, class)
    }

    pub fn parking_for(self, id: &str, class: &str) -> Self {
        // jstack prints two spaces before the lock id here
        self.lock_line("parking to wait for ", id, class)
    }

    pub fn waiting_to_lock(self, id: &str, class: &str) -> Self {
        self.lock_line("waiting to lock", id, class)
    }

    pub fn locked(self, id: &str, class: &str) -> Self {
        self.lock_line("locked", id, class)
    }

    pub fn eliminated(self, id: &str, class: &str) -> Self {
        self.lock_line("eliminated", id, class)
    }

    /// Add a raw body line verbatim
    pub fn raw(mut self, line: &str) -> Self {
        self.body.push(line.to_string());
        self
    }

    /// Add an entry under `Locked ownable synchronizers:`
    pub fn owns_synchronizer(mut self, id: &str, class: &str) -> Self {
        self.ownable.push((id.to_string(), class.to_string()));
        self
    }

    fn lock_line(mut self, verb: &str, id: &str, class: &str) -> Self {
        self.body.push(format!("\t- {} <{}> (a {})", verb, id, class));
        self
    }

    fn lines(&self) -> Vec<String> {
        let daemon = if self.daemon { " daemon" } else { "" };
        let mut lines = vec![format!(
            "\"{}\" #{}{} prio=5 os_prio=0 tid=0x00007f0000{:06x} nid=0x{:x} runnable",
            self.name, self.nid, daemon, self.nid, self.nid
        )];
        if let Some(state) = &self.state {
            lines.push(format!("   java.lang.Thread.State: {}", state));
        }
        lines.extend(self.body.iter().cloned());
        lines.push(String::new());
        lines.push("   Locked ownable synchronizers:".to_string());
        if self.ownable.is_empty() {
            lines.push("\t- None".to_string());
        }
        for (id, class) in &self.ownable {
            lines.push(format!("\t- <{}> (a {})", id, class));
        }
        lines
    }
}

/// Create a temp directory holding the given dumps
pub fn dump_dir(dumps: &[(&str, DumpBuilder)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    for (filename, dump) in dumps {
        dump.write_to(dir.path(), filename);
    }
    dir
}

/// A realistic dump: a monitor owner with two blocked threads, a wait/notify consumer,
/// a parked pool worker, an ownable synchronizer holder and a VM thread
pub fn realistic_dump() -> DumpBuilder {
    DumpBuilder::new()
        .with_thread(
            ThreadBuilder::new("main", 1)
                .state("RUNNABLE")
                .frame("com.example.Cache.rebuild(Cache.java:88)")
                .locked("0x000000076b000010", "com.example.Cache")
                .frame("com.example.App.main(App.java:12)"),
        )
        .with_thread(
            ThreadBuilder::new("http-worker-1", 21)
                .daemon()
                .state("BLOCKED (on object monitor)")
                .frame("com.example.Cache.get(Cache.java:40)")
                .waiting_to_lock("0x000000076b000010", "com.example.Cache")
                .frame("com.example.Handler.handle(Handler.java:17)"),
        )
        .with_thread(
            ThreadBuilder::new("http-worker-2", 22)
                .daemon()
                .state("BLOCKED (on object monitor)")
                .frame("com.example.Cache.get(Cache.java:40)")
                .waiting_to_lock("0x000000076b000010", "com.example.Cache")
                .frame("com.example.Handler.handle(Handler.java:17)"),
        )
        .with_thread(
            ThreadBuilder::new("consumer", 30)
                .state("WAITING (on object monitor)")
                .frame("java.lang.Object.wait(Native Method)")
                .waiting_on("0x000000076b000020", "java.util.LinkedList")
                .frame("java.lang.Object.wait(Object.java:502)")
                .frame("com.example.Queue.take(Queue.java:31)")
                .locked("0x000000076b000020", "java.util.LinkedList"),
        )
        .with_thread(
            ThreadBuilder::new("pool-1-thread-1", 40)
                .state("TIMED_WAITING (parking)")
                .frame("jdk.internal.misc.Unsafe.park(Native Method)")
                .parking_for(
                    "0x000000076b000030",
                    "java.util.concurrent.locks.AbstractQueuedSynchronizer$ConditionObject",
                )
                .frame("java.util.concurrent.locks.LockSupport.parkNanos(LockSupport.java:252)"),
        )
        .with_thread(
            ThreadBuilder::new("scheduler", 50)
                .state("RUNNABLE")
                .frame("com.example.Scheduler.tick(Scheduler.java:9)")
                .owns_synchronizer(
                    "0x000000076b000040",
                    "java.util.concurrent.locks.ReentrantLock$NonfairSync",
                ),
        )
        .with_thread(ThreadBuilder::new("VM Thread", 2))
}

/// Assert the structural invariants every parsed dump must satisfy
pub fn assert_model_consistent(dump: &ThreadDump) {
    for (index, thread) in dump.threads.iter().enumerate() {
        for lock in thread.held_locks.iter().chain(&thread.classical_locks) {
            assert!(lock.index() < dump.locks.len(), "dangling held lock on {}", thread.name);
        }
        for lock in &thread.classical_locks {
            assert!(thread.held_locks.contains(lock), "classical lock not held on {}", thread.name);
        }
        if let Some(target) = thread.waiting_on {
            assert!(target.index() < dump.locks.len(), "dangling wait target on {}", thread.name);
            assert!(!thread.held_locks.contains(&target), "{} holds its wait target", thread.name);
            assert!(
                dump.lock(target).waiters.iter().any(|t| t.index() == index),
                "{} missing from its target's waiters",
                thread.name
            );
        }
    }

    for lock in &dump.locks {
        for &waiter in &lock.waiters {
            let thread = dump.thread(waiter);
            assert_eq!(
                thread.waiting_on.map(|l| dump.lock(l).id.as_str()),
                Some(lock.id.as_str()),
                "waiter {} does not point back at <{}>",
                thread.name,
                lock.id
            );
        }
        if let Some(owner) = lock.owner {
            assert!(owner.index() < dump.threads.len(), "dangling owner on <{}>", lock.id);
        }
    }

    let mut ids: Vec<_> = dump.locks.iter().map(|l| l.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), dump.locks.len(), "duplicate lock ids");
}
