use std::collections::HashMap;

use crate::models::{Lock, LockRef, ThreadDump};

/// Deduplicates locks by identity key within one dump
///
/// The registry only indexes; the locks themselves live in [`ThreadDump::locks`].
/// A registry must never be reused across dumps.
#[derive(Debug, Default)]
pub struct LockRegistry {
    by_id: HashMap<String, LockRef>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lock with `id`, creating it with `class_name` if it was never seen
    ///
    /// First sighting wins: a later reference with a different class name does not
    /// relabel the lock.
    pub fn fetch_or_create(&mut self, dump: &mut ThreadDump, id: &str, class_name: &str) -> LockRef {
        if let Some(&existing) = self.by_id.get(id) {
            return existing;
        }

        let lock = dump.push_lock(Lock::new(id, class_name));
        self.by_id.insert(id.to_string(), lock);
        lock
    }

    pub fn get(&self, id: &str) -> Option<LockRef> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_resolves_to_same_lock() {
        let mut dump = ThreadDump::default();
        let mut registry = LockRegistry::new();

        let first = registry.fetch_or_create(&mut dump, "0x01", "java.lang.Object");
        let second = registry.fetch_or_create(&mut dump, "0x01", "java.lang.Object");

        assert_eq!(first, second);
        assert_eq!(dump.locks.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_first_seen_class_wins() {
        let mut dump = ThreadDump::default();
        let mut registry = LockRegistry::new();

        let lock = registry.fetch_or_create(&mut dump, "0x01", "java.lang.Object");
        registry.fetch_or_create(&mut dump, "0x01", "java.lang.String");

        assert_eq!(dump.lock(lock).class_name, "java.lang.Object");
    }

    #[test]
    fn test_new_lock_is_unowned_and_uncontended() {
        let mut dump = ThreadDump::default();
        let mut registry = LockRegistry::new();

        let lock = registry.fetch_or_create(&mut dump, "0x02", "java.lang.Object");
        let lock = dump.lock(lock);

        assert_eq!(lock.id, "0x02");
        assert!(lock.owner.is_none());
        assert!(!lock.is_contended());
    }

    #[test]
    fn test_distinct_ids_append_in_order() {
        let mut dump = ThreadDump::default();
        let mut registry = LockRegistry::new();

        registry.fetch_or_create(&mut dump, "0x0b", "A");
        registry.fetch_or_create(&mut dump, "0x0a", "B");

        let ids: Vec<_> = dump.locks.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["0x0b", "0x0a"]);
        assert_eq!(registry.get("0x0a"), dump.find_lock("0x0a"));
        assert!(registry.get("0x0c").is_none());
    }
}
