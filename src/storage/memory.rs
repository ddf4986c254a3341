//! In-memory storage backend.
//!
//! Provides [`InMemoryStore`], a thread-safe in-memory implementation of
//! [`super::KeyValueStore`]. Ideal for unit and integration tests where
//! file I/O is undesirable.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{LedgerError, Result};

/// Thread-safe in-memory key-value store.
///
/// # Example
///
/// ```rust
/// use finance_ledger::ledger::Ledger;
/// use finance_ledger::storage::InMemoryStore;
///
/// let ledger = Ledger::new(InMemoryStore::new());
/// assert!(ledger.transactions().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Blobs by key, behind a mutex for interior mutability.
    inner: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    #[inline]
    pub fn len(&self) -> Result<usize> {
        self.with_lock(|blobs| blobs.len())
    }

    /// Returns `true` if no key has been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    #[inline]
    pub fn is_empty(&self) -> Result<bool> {
        self.with_lock(|blobs| blobs.is_empty())
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut HashMap<String, Vec<u8>>) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> LedgerError {
    LedgerError::Storage(err.to_string().into())
}

impl super::KeyValueStore for InMemoryStore {
    #[inline]
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.with_lock(|blobs| blobs.get(key).cloned())
    }

    #[inline]
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.with_lock(|blobs| {
            let _previous = blobs.insert(key.to_owned(), value.to_vec());
        })
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        self.with_lock(|blobs| {
            let _previous = blobs.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());
        assert!(store.get("saved_transactions").unwrap().is_none());
    }

    #[test]
    fn set_then_get_returns_blob() {
        let store = InMemoryStore::new();
        store.set("k", b"[1,2,3]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"[1,2,3]"[..]));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn set_replaces_previous_blob() {
        let store = InMemoryStore::new();
        store.set("k", b"old").unwrap();
        store.set("k", b"new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"new"[..]));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = InMemoryStore::new();
        store.remove("absent").unwrap();
        store.set("k", b"v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn store_works_through_reference() {
        let store = InMemoryStore::new();
        let by_ref: &InMemoryStore = &store;
        KeyValueStore::set(&by_ref, "k", b"v").unwrap();
        assert!(store.get("k").unwrap().is_some());
    }
}
