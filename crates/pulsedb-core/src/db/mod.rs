//! Indexed entity store.
//!
//! Every entity type gets a key space (`data:{entity}:{key}`) and one ordered
//! membership index (`index:{index}`). All multi-key writes go through one
//! conditional batch so the index never drifts from the stored records.

pub mod cursor;
mod entity;
pub mod index;
pub mod response;
pub mod store;

pub use entity::{Entities, EntityHandle};

use crate::{
    config::{ConfigError, DbConfig},
    db::store::KvStore,
    traits::EntityKind,
};

///
/// Db
///
/// A backing store plus the runtime configuration for entity operations.
///
/// `S` is any [`KvStore`]; borrowed (`&MemoryStore`) and shared
/// (`Arc<RedbStore>`) handles both work, so a `Db` can be built per request
/// around a long-lived store.
///

#[derive(Debug)]
pub struct Db<S> {
    store: S,
    config: DbConfig,
}

impl<S: KvStore> Db<S> {
    /// Wrap a store with the default configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: DbConfig::default(),
        }
    }

    /// Wrap a store with an explicit configuration.
    ///
    /// The configuration is validated here as well as at load time, so a
    /// hand-built `DbConfig` cannot produce empty pages.
    pub fn with_config(store: S, config: DbConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { store, config })
    }

    /// Typed accessor for one entity type.
    #[must_use]
    pub const fn entities<E: EntityKind>(&self) -> Entities<'_, E, S> {
        Entities::new(self)
    }

    /// Handle bound to one record key. Nothing is read until asked.
    #[must_use]
    pub fn handle<E: EntityKind>(&self, key: impl Into<String>) -> EntityHandle<'_, E, S> {
        EntityHandle::new(self, key.into())
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Consume the handle and return the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
