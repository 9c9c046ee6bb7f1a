//! Capacity-capped, de-duplicating result collection

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use initia_vanity_keys::DerivedKey;

/// Outcome of offering a match to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Appended; `filled` is true for the entry that reached capacity
    Added { filled: bool },
    /// Capacity was already reached by another worker
    Full,
    /// Address already collected
    Duplicate,
}

#[derive(Debug, Default)]
struct Inner {
    results: Vec<DerivedKey>,
    seen: HashSet<String>,
}

/// Ordered results in discovery order, never more than `capacity`
#[derive(Debug)]
pub struct ResultStore {
    capacity: usize,
    len: AtomicUsize,
    inner: Mutex<Inner>,
}

impl ResultStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            len: AtomicUsize::new(0),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lock-free length, mirrors the locked vector
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unlocked pre-check; `try_insert` re-checks under the lock
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Append `result` if there is room and the address is new.
    ///
    /// `on_added` runs while the lock is still held, so a counter bumped there
    /// never disagrees with `len()` once the search is over.
    pub fn try_insert(&self, result: DerivedKey, on_added: impl FnOnce()) -> Insertion {
        let mut inner = self.lock();

        if inner.results.len() >= self.capacity {
            return Insertion::Full;
        }
        if !inner.seen.insert(result.address.clone()) {
            return Insertion::Duplicate;
        }

        inner.results.push(result);
        let len = inner.results.len();
        self.len.store(len, Ordering::Release);
        on_added();

        Insertion::Added { filled: len >= self.capacity }
    }

    /// Copy of the collected results
    pub fn snapshot(&self) -> Vec<DerivedKey> {
        self.lock().results.clone()
    }

    // A poisoned lock still guards a consistent vector.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn key(address: &str) -> DerivedKey {
        DerivedKey {
            address: address.to_string(),
            private_key_hex: "00".repeat(32),
            public_key: String::new(),
            mnemonic: None,
            derivation_path: None,
        }
    }

    #[test]
    fn test_capacity_respected() {
        let store = ResultStore::new(2);
        assert_eq!(store.try_insert(key("init1a"), || {}), Insertion::Added { filled: false });
        assert_eq!(store.try_insert(key("init1b"), || {}), Insertion::Added { filled: true });
        assert_eq!(store.try_insert(key("init1c"), || {}), Insertion::Full);
        assert!(store.is_full());

        let addresses: Vec<_> = store.snapshot().into_iter().map(|k| k.address).collect();
        assert_eq!(addresses, vec!["init1a", "init1b"]);
    }

    #[test]
    fn test_duplicates_rejected() {
        let store = ResultStore::new(3);
        let mut added = 0;
        assert_eq!(store.try_insert(key("init1a"), || added += 1), Insertion::Added { filled: false });
        assert_eq!(store.try_insert(key("init1a"), || added += 1), Insertion::Duplicate);
        assert_eq!(added, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_writers_never_overfill() {
        let store = Arc::new(ResultStore::new(5));
        let added = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                let added = added.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        store.try_insert(key(&format!("init1{}x{}", t, i)), || {
                            added.fetch_add(1, Ordering::Relaxed);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 5);
        assert_eq!(store.snapshot().len(), 5);
        assert_eq!(added.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = ResultStore::new(2);
        store.try_insert(key("init1a"), || {});
        let snapshot = store.snapshot();
        store.try_insert(key("init1b"), || {});
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }
}
