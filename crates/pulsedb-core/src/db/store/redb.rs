//! Durable backend on redb, a pure-Rust embedded database.
//!
//! All keys live in one table. A batch is one redb write transaction:
//! preconditions are read inside it and the transaction is aborted on the
//! first one that fails, so redb's single-writer model gives atomicity.

use crate::db::store::{CommitOutcome, KvStore, StoreError, WriteBatch, WriteOp};
use redb::{Database, ReadableTable, TableDefinition, TableError};
use std::path::Path;

const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("pulse_kv");

///
/// RedbStore
///

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { db })
    }

    /// Create a non-persistent database.
    pub fn in_memory() -> Result<Self, StoreError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { db })
    }
}

fn backend<E: std::fmt::Display>(err: E) -> StoreError {
    StoreError::Backend(err.to_string())
}

impl KvStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let tx = self.db.begin_read().map_err(backend)?;
        let table = match tx.open_table(KV_TABLE) {
            Ok(table) => table,
            // nothing has been written yet
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(err) => return Err(backend(err)),
        };

        let value = table.get(key).map_err(backend)?;

        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitOutcome, StoreError> {
        let (preconditions, ops) = batch.into_parts();
        let tx = self.db.begin_write().map_err(backend)?;

        {
            let mut table = tx.open_table(KV_TABLE).map_err(backend)?;

            for precondition in &preconditions {
                let current = table
                    .get(precondition.key())
                    .map_err(backend)?
                    .map(|guard| guard.value().to_vec());

                if !precondition.holds(current.as_deref()) {
                    drop(table);
                    tx.abort().map_err(backend)?;

                    return Ok(CommitOutcome::Conflict {
                        key: precondition.key().to_string(),
                    });
                }
            }

            for op in &ops {
                match op {
                    WriteOp::Put(key, value) => {
                        table.insert(key.as_str(), value.as_slice()).map_err(backend)?;
                    }
                    WriteOp::Delete(key) => {
                        table.remove(key.as_str()).map_err(backend)?;
                    }
                }
            }
        }

        tx.commit().map_err(backend)?;

        Ok(CommitOutcome::Committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_before_first_write_is_empty() {
        let store = RedbStore::in_memory().expect("in-memory redb should open");

        assert_eq!(store.get("index:groups").expect("get should succeed"), None);
    }

    #[test]
    fn conflict_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = RedbStore::open(dir.path().join("pulse.redb")).expect("redb should open");

        let outcome = store
            .commit(WriteBatch::new().expect_absent("a").put("a", vec![1]))
            .expect("first commit should succeed");
        assert!(outcome.is_committed());

        let outcome = store
            .commit(
                WriteBatch::new()
                    .expect_absent("a")
                    .put("a", vec![2])
                    .put("b", vec![3]),
            )
            .expect("second commit should run");
        assert_eq!(
            outcome,
            CommitOutcome::Conflict {
                key: "a".to_string()
            }
        );
        assert_eq!(store.get("a").expect("get a"), Some(vec![1]));
        assert_eq!(store.get("b").expect("get b"), None);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("pulse.redb");

        {
            let store = RedbStore::open(&path).expect("redb should open");
            store
                .commit(WriteBatch::new().put("data:group:g1", vec![7]))
                .expect("commit should succeed");
        }

        let store = RedbStore::open(&path).expect("redb should reopen");
        assert_eq!(
            store.get("data:group:g1").expect("get should succeed"),
            Some(vec![7])
        );
    }
}
