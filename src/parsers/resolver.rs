use crate::models::{ThreadDump, ThreadRef};

/// Attribute a wait target to parked threads whose dump text never named one
///
/// For each thread that is BLOCKED, WAITING or TIMED_WAITING with no wait target, the
/// first monitor it holds (in the order the parser met them) becomes the target: the lock
/// loses its owner, gains the thread as a waiter, and leaves the thread's held sets.
///
/// This is a best-effort guess. A thread holding several monitors gives no hint which one
/// it went on to wait for, and the first is taken. Threads that hold no monitor are left
/// without a target.
///
/// Returns the number of threads that received an inferred target.
pub fn resolve_anonymous_synchronizers(dump: &mut ThreadDump) -> usize {
    let mut resolved = 0;

    for index in 0..dump.threads.len() {
        let me = ThreadRef(index);
        let thread = &dump.threads[index];

        if !thread.status.is_parked() || thread.waiting_on.is_some() {
            continue;
        }

        let Some(&lock) = thread.classical_locks.first() else {
            log::debug!(
                "No monitor to attribute as wait target for {} thread \"{}\"",
                thread.status,
                thread.name
            );
            continue;
        };

        let thread = dump.thread_mut(me);
        thread.held_locks.retain(|&l| l != lock);
        thread.classical_locks.retain(|&l| l != lock);
        thread.waiting_on = Some(lock);

        let target = dump.lock_mut(lock);
        target.owner = None;
        if !target.waiters.contains(&me) {
            target.waiters.push(me);
        }

        resolved += 1;
    }

    resolved
}
