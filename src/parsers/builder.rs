use crate::models::{LockRef, ThreadDump, ThreadRef, ThreadStatus};

/// Cursor over the thread currently being assembled
///
/// Every mutation keeps two invariants: a lock's waiter list agrees with each waiter's
/// `waiting_on`, and a thread never holds the lock it waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadBuilder {
    thread: ThreadRef,
}

impl ThreadBuilder {
    pub fn new(thread: ThreadRef) -> Self {
        Self { thread }
    }

    pub fn thread(self) -> ThreadRef {
        self.thread
    }

    pub fn add_frame(self, dump: &mut ThreadDump, frame: &str) {
        dump.thread_mut(self.thread).frames.push(frame.to_string());
    }

    pub fn set_status(self, dump: &mut ThreadDump, status: ThreadStatus) {
        dump.thread_mut(self.thread).status = status;
    }

    pub fn waiting_on(self, dump: &ThreadDump) -> Option<LockRef> {
        dump.thread(self.thread).waiting_on
    }

    /// Make `lock` this thread's wait target
    ///
    /// A previous target loses this thread from its waiters, and `lock` leaves the
    /// thread's held sets.
    pub fn wait_on(self, dump: &mut ThreadDump, lock: LockRef) {
        let me = self.thread;

        if let Some(previous) = dump.thread(me).waiting_on {
            if previous == lock {
                return;
            }
            dump.lock_mut(previous).waiters.retain(|&t| t != me);
        }

        let thread = dump.thread_mut(me);
        thread.held_locks.retain(|&l| l != lock);
        thread.classical_locks.retain(|&l| l != lock);
        thread.waiting_on = Some(lock);

        let target = dump.lock_mut(lock);
        if target.owner == Some(me) {
            target.owner = None;
        }
        if !target.waiters.contains(&me) {
            target.waiters.push(me);
        }
    }

    /// Record ownership of a monitor (`- locked <id>`)
    pub fn acquire_monitor(self, dump: &mut ThreadDump, lock: LockRef) {
        self.acquire(dump, lock, true);
    }

    /// Record ownership of an ownable synchronizer (`- <id> (a class)`)
    pub fn acquire_synchronizer(self, dump: &mut ThreadDump, lock: LockRef) {
        self.acquire(dump, lock, false);
    }

    fn acquire(self, dump: &mut ThreadDump, lock: LockRef, classical: bool) {
        let me = self.thread;
        if dump.thread(me).waiting_on == Some(lock) {
            return;
        }
        dump.lock_mut(lock).owner = Some(me);

        let thread = dump.thread_mut(me);
        if !thread.held_locks.contains(&lock) {
            thread.held_locks.push(lock);
        }
        if classical && !thread.classical_locks.contains(&lock) {
            thread.classical_locks.push(lock);
        }
    }
}
