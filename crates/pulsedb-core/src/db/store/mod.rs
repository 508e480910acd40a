//! Key-value backing store seam.
//!
//! The entity layer needs only point reads and one atomic primitive: a
//! conditional batch that checks every precondition and applies every
//! mutation as a unit, or does nothing.

mod batch;
mod key;
mod memory;
#[cfg(feature = "redb")]
mod redb;
#[cfg(test)]
mod tests;

pub use batch::{CommitOutcome, Precondition, WriteBatch, WriteOp};
pub use key::{DataKey, IndexKey};
pub use memory::MemoryStore;
#[cfg(feature = "redb")]
pub use redb::RedbStore;

use crate::error::InternalError;
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Backend I/O failure. Propagated unchanged; the entity layer never
/// retries these.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for InternalError {
    fn from(err: StoreError) -> Self {
        Self::store_internal(err.to_string())
    }
}

///
/// KvStore
///
/// Flat string-keyed byte store. Implementations must be safe to share
/// between request handlers.
///

pub trait KvStore: Send + Sync {
    /// Point lookup.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Existence check.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Atomically validate `batch` preconditions and apply its writes.
    ///
    /// A failed precondition is reported as [`CommitOutcome::Conflict`]
    /// with nothing written.
    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        (**self).contains(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError> {
        (**self).commit(batch)
    }
}

impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        (**self).contains(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError> {
        (**self).commit(batch)
    }
}
