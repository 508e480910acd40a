use crate::db::store::{CommitOutcome, KvStore, StoreError, WriteBatch, WriteOp};
use parking_lot::RwLock;
use std::collections::BTreeMap;

///
/// MemoryStore
///
/// In-process store. Batches are validated and applied under one write
/// lock, so concurrent commits serialize.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys (records and indexes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All stored keys in byte order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.get_mut().clear();
    }

    /// Write raw bytes, bypassing the entity layer.
    pub fn insert_raw(&self, key: impl Into<String>, value: Vec<u8>) {
        self.entries.write().insert(key.into(), value);
    }

    /// Delete raw bytes, bypassing the entity layer.
    pub fn remove_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.write().remove(key)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.read().contains_key(key))
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError> {
        let (preconditions, ops) = batch.into_parts();
        let mut entries = self.entries.write();

        for precondition in &preconditions {
            let current = entries.get(precondition.key()).map(Vec::as_slice);
            if !precondition.holds(current) {
                return Ok(CommitOutcome::Conflict {
                    key: precondition.key().to_string(),
                });
            }
        }

        for op in ops {
            match op {
                WriteOp::Put(key, value) => {
                    entries.insert(key, value);
                }
                WriteOp::Delete(key) => {
                    entries.remove(&key);
                }
            }
        }

        Ok(CommitOutcome::Committed)
    }
}
