use crate::{
    db::{
        Db,
        cursor::ListCursor,
        index::{EntityIndex, StoredIndex},
        response::{CreateOutcome, Page, PageRequest, SeedOutcome},
        store::{CommitOutcome, DataKey, IndexKey, KvStore, WriteBatch},
    },
    error::InternalError,
    obs::sink::{MetricsEvent, OpKind, record},
    patch::MergePatchError,
    serialize::{deserialize, serialize},
    traits::EntityKind,
};
use std::marker::PhantomData;
use tracing::{debug, info, warn};

///
/// Step
///
/// One attempt of a conditional write: either finish without writing, or
/// commit a batch and yield the value on success.
///

enum Step<T> {
    Finish(T),
    Commit(WriteBatch, T),
}

///
/// Entities
///
/// Type-level operations for one entity type: seeding, listing, creation
/// and deletion. Stateless; every call goes to the store.
///

pub struct Entities<'a, E, S> {
    db: &'a Db<S>,
    _marker: PhantomData<fn() -> E>,
}

impl<'a, E, S> Entities<'a, E, S>
where
    E: EntityKind,
    S: KvStore,
{
    pub(crate) const fn new(db: &'a Db<S>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    const fn entity() -> &'static str {
        E::MODEL.entity_name
    }

    fn index_key() -> String {
        IndexKey::new(E::MODEL).to_raw()
    }

    fn data_key(key: &str) -> String {
        DataKey::new(E::MODEL, key).to_raw()
    }

    /// Handle bound to one record key.
    #[must_use]
    pub fn handle(&self, key: impl Into<String>) -> EntityHandle<'a, E, S> {
        EntityHandle::new(self.db, key.into())
    }

    /// Insert the type's seed rows once, the first time its index is
    /// missing. Repeated and concurrent calls are no-ops.
    pub fn ensure_seed(&self) -> Result<SeedOutcome, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Seed,
            entity: Self::entity(),
        });

        if !self.db.config().seed.enabled {
            return Ok(SeedOutcome::Disabled);
        }

        let index_key = Self::index_key();
        let rows = E::seed_data();

        let outcome = run_conditional(self.db, Self::entity(), "seed", || {
            if self.db.store().contains(&index_key)? {
                return Ok(Step::Finish(SeedOutcome::AlreadySeeded));
            }
            if rows.is_empty() {
                return Ok(Step::Finish(SeedOutcome::NoSeedData));
            }

            // claim the index key; a concurrent seeder loses the precondition
            let mut batch = WriteBatch::new().expect_absent(index_key.clone());
            let mut index = EntityIndex::new();
            for row in &rows {
                let key = checked_key(row)?;
                batch = batch.put(Self::data_key(&key), serialize(row)?);
                index.insert(key);
            }
            let seeded = index.len();
            batch = batch.put(index_key.clone(), index.to_bytes()?);

            Ok(Step::Commit(batch, SeedOutcome::Seeded { rows: seeded }))
        })?;

        if let SeedOutcome::Seeded { rows: seeded } = outcome {
            info!(entity = Self::entity(), rows = seeded, "seeded entity index");
            record(MetricsEvent::RowsWritten {
                entity: Self::entity(),
                rows: rows.len() as u64,
            });
            record(MetricsEvent::IndexDelta {
                entity: Self::entity(),
                inserts: seeded as u64,
                removes: 0,
            });
        }

        Ok(outcome)
    }

    /// Resolve index keys to records, in index order.
    ///
    /// Keys whose record is missing are skipped and logged.
    pub fn list(&self, request: PageRequest) -> Result<Page<E>, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::List,
            entity: Self::entity(),
        });

        let stored = StoredIndex::load(self.db.store(), &IndexKey::new(E::MODEL))?;
        let index = stored.index;

        let start = match request.cursor.as_deref() {
            Some(token) => ListCursor::decode(token)?.resume_position(&index),
            None => 0,
        };
        let limit = self.page_limit(request.limit);

        let mut items = Vec::new();
        let mut last = None;
        for (pos, key) in index.iter().enumerate().skip(start) {
            if items.len() >= limit {
                break;
            }
            last = Some((pos, key));

            match self.db.store().get(&Self::data_key(key))? {
                Some(bytes) => items.push(deserialize::<E>(&bytes)?),
                None => {
                    warn!(
                        entity = Self::entity(),
                        key = %key,
                        "index entry has no record; skipping"
                    );
                    record(MetricsEvent::DanglingIndexEntry {
                        entity: Self::entity(),
                    });
                }
            }
        }

        let next_cursor = match last {
            Some((pos, key)) if pos + 1 < index.len() => {
                Some(ListCursor::new(pos as u64 + 1, key.clone()).encode()?)
            }
            _ => None,
        };

        record(MetricsEvent::RowsLoaded {
            entity: Self::entity(),
            rows: items.len() as u64,
        });
        debug!(
            entity = Self::entity(),
            rows = items.len(),
            more = next_cursor.is_some(),
            "listed records"
        );

        Ok(Page::new(items, next_cursor))
    }

    fn page_limit(&self, requested: Option<u32>) -> usize {
        let list = &self.db.config().list;
        let limit = requested
            .or(list.default_limit)
            .map_or(list.max_limit, |limit| limit.clamp(1, list.max_limit));

        usize::try_from(limit).unwrap_or(usize::MAX)
    }

    /// Store a new record and append its key to the index.
    ///
    /// An existing record at the same key is never overwritten; that case
    /// returns [`CreateOutcome::Duplicate`].
    pub fn create(&self, entity: E) -> Result<CreateOutcome<E>, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Create,
            entity: Self::entity(),
        });

        let key = checked_key(&entity)?;
        let data_key = Self::data_key(&key);
        let index_key = IndexKey::new(E::MODEL);
        let row = serialize(&entity)?;

        let appended = run_conditional(self.db, Self::entity(), "create", || {
            if self.db.store().contains(&data_key)? {
                return Ok(Step::Finish(None));
            }

            let stored = StoredIndex::load(self.db.store(), &index_key)?;
            let mut index = stored.index;
            let appended = index.insert(key.clone());

            let batch = WriteBatch::new()
                .expect_absent(data_key.clone())
                .expect_value(index_key.to_raw(), stored.raw)
                .put(data_key.clone(), row.clone())
                .put(index_key.to_raw(), index.to_bytes()?);

            Ok(Step::Commit(batch, Some(appended)))
        })?;

        let Some(appended) = appended else {
            debug!(entity = Self::entity(), key = %key, "create rejected: key exists");
            record(MetricsEvent::DuplicateRejected {
                entity: Self::entity(),
            });

            return Ok(CreateOutcome::Duplicate { key });
        };

        debug!(entity = Self::entity(), key = %key, "created record");
        record(MetricsEvent::RowsWritten {
            entity: Self::entity(),
            rows: 1,
        });
        record(MetricsEvent::IndexDelta {
            entity: Self::entity(),
            inserts: u64::from(appended),
            removes: 0,
        });

        Ok(CreateOutcome::Created(entity))
    }

    /// Remove a record and its index entry. Returns `false` when there was
    /// no record to delete.
    pub fn delete(&self, key: &str) -> Result<bool, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Delete,
            entity: Self::entity(),
        });

        let data_key = Self::data_key(key);
        let index_key = IndexKey::new(E::MODEL);

        let removed = run_conditional(self.db, Self::entity(), "delete", || {
            if !self.db.store().contains(&data_key)? {
                return Ok(Step::Finish(None));
            }

            let stored = StoredIndex::load(self.db.store(), &index_key)?;
            let mut index = stored.index;
            let removed = index.remove(key);

            let batch = WriteBatch::new()
                .expect_present(data_key.clone())
                .expect_value(index_key.to_raw(), stored.raw)
                .delete(data_key.clone())
                .put(index_key.to_raw(), index.to_bytes()?);

            Ok(Step::Commit(batch, Some(removed)))
        })?;

        let Some(removed) = removed else {
            debug!(entity = Self::entity(), key = %key, "delete: no record");

            return Ok(false);
        };

        debug!(entity = Self::entity(), key = %key, "deleted record");
        record(MetricsEvent::IndexDelta {
            entity: Self::entity(),
            inserts: 0,
            removes: u64::from(removed),
        });

        Ok(true)
    }
}

///
/// EntityHandle
///
/// Transient reference to one record by key. Holds no record state; each
/// call reads or writes the store.
///

pub struct EntityHandle<'a, E, S> {
    db: &'a Db<S>,
    key: String,
    _marker: PhantomData<fn() -> E>,
}

impl<'a, E, S> EntityHandle<'a, E, S>
where
    E: EntityKind,
    S: KvStore,
{
    pub(crate) const fn new(db: &'a Db<S>, key: String) -> Self {
        Self {
            db,
            key,
            _marker: PhantomData,
        }
    }

    const fn entity() -> &'static str {
        E::MODEL.entity_name
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn data_key(&self) -> String {
        DataKey::new(E::MODEL, self.key.as_str()).to_raw()
    }

    fn not_found(&self) -> InternalError {
        InternalError::store_not_found(Self::entity(), self.key.as_str())
    }

    /// Point lookup. Absence is `Ok(false)`, never an error.
    pub fn exists(&self) -> Result<bool, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Exists,
            entity: Self::entity(),
        });

        Ok(self.db.store().contains(&self.data_key())?)
    }

    /// Read the current record; not-found when absent.
    pub fn state(&self) -> Result<E, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Load,
            entity: Self::entity(),
        });

        let bytes = self
            .db
            .store()
            .get(&self.data_key())?
            .ok_or_else(|| self.not_found())?;
        let entity = deserialize::<E>(&bytes)?;

        record(MetricsEvent::RowsLoaded {
            entity: Self::entity(),
            rows: 1,
        });

        Ok(entity)
    }

    /// Replace the stored record wholesale.
    ///
    /// Only existing records can be saved; the index is never touched.
    pub fn save(&self, state: E) -> Result<(), InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Save,
            entity: Self::entity(),
        });

        let found = state.key();
        if found != self.key {
            return Err(InternalError::entity_invalid(format!(
                "cannot save {} '{found}' through handle for '{}'",
                Self::entity(),
                self.key
            )));
        }

        let data_key = self.data_key();
        let row = serialize(&state)?;

        run_conditional(self.db, Self::entity(), "save", || {
            if !self.db.store().contains(&data_key)? {
                return Err(self.not_found());
            }

            let batch = WriteBatch::new()
                .expect_present(data_key.clone())
                .put(data_key.clone(), row.clone());

            Ok(Step::Commit(batch, ()))
        })?;

        debug!(entity = Self::entity(), key = %self.key, "saved record");
        record(MetricsEvent::RowsWritten {
            entity: Self::entity(),
            rows: 1,
        });

        Ok(())
    }

    /// Merge supplied fields over the current record and store the result.
    ///
    /// The write only lands if the record is unchanged since it was read;
    /// otherwise the merge is redone against the newer state.
    pub fn patch(&self, update: E::UpdateViewType) -> Result<E, InternalError> {
        record(MetricsEvent::OpStart {
            kind: OpKind::Patch,
            entity: Self::entity(),
        });

        let data_key = self.data_key();

        let merged = run_conditional(self.db, Self::entity(), "patch", || {
            let current_bytes = self
                .db
                .store()
                .get(&data_key)?
                .ok_or_else(|| self.not_found())?;

            let mut merged = deserialize::<E>(&current_bytes)?;
            merged.merge(update.clone())?;

            let found = merged.key();
            if found != self.key {
                return Err(MergePatchError::KeyChanged {
                    expected: self.key.clone(),
                    found,
                }
                .into());
            }

            let batch = WriteBatch::new()
                .expect_value(data_key.clone(), Some(current_bytes))
                .put(data_key.clone(), serialize(&merged)?);

            Ok(Step::Commit(batch, merged))
        })?;

        debug!(entity = Self::entity(), key = %self.key, "patched record");
        record(MetricsEvent::RowsWritten {
            entity: Self::entity(),
            rows: 1,
        });

        Ok(merged)
    }
}

/// Derive and validate a record key.
fn checked_key<E: EntityKind>(entity: &E) -> Result<String, InternalError> {
    let key = entity.key();
    if key.is_empty() {
        return Err(InternalError::entity_invalid(format!(
            "{} record has an empty key",
            E::MODEL.entity_name
        )));
    }

    Ok(key)
}

/// Drive a conditional write until it commits, finishes without writing,
/// or exhausts the configured retries.
///
/// The first attempt is not a retry, so `max_retries = 0` still tries once.
/// Only precondition conflicts are retried. Store and decode errors from
/// `step` return immediately.
fn run_conditional<S, T>(
    db: &Db<S>,
    entity: &'static str,
    op: &'static str,
    mut step: impl FnMut() -> Result<Step<T>, InternalError>,
) -> Result<T, InternalError>
where
    S: KvStore,
{
    let max_retries = db.config().commit.max_retries;

    for attempt in 0..=max_retries {
        match step()? {
            Step::Finish(value) => return Ok(value),
            Step::Commit(batch, value) => match db.store().commit(batch)? {
                CommitOutcome::Committed => return Ok(value),
                CommitOutcome::Conflict { key } => {
                    warn!(entity, op, conflict = %key, attempt, "conditional write lost a race");
                    record(MetricsEvent::CommitRetry { entity });
                }
            },
        }
    }

    Err(InternalError::entity_conflict(format!(
        "{op} on {entity} did not commit after {max_retries} retries"
    )))
}
