//! Pluggable key-value storage backends for persisting ledger collections.
//!
//! The ledger stores each collection as one opaque blob under a string key
//! and always rewrites the whole blob. Backends only need to implement
//! [`KeyValueStore`].

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStore;
pub use memory::InMemoryStore;

use crate::error::Result;

/// Blocking key-value blob store backing a [`crate::ledger::Ledger`].
///
/// All methods take `&self`; implementations should use interior
/// mutability (e.g. `Mutex`) for mutation.
pub trait KeyValueStore: core::fmt::Debug {
    /// Returns the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes the blob stored under `key`. Removing a missing key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    #[inline]
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    #[inline]
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
