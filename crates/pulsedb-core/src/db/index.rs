use crate::{
    db::store::{IndexKey, KvStore},
    error::InternalError,
    serialize::{deserialize, serialize},
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// EntityIndex
///
/// Ordered membership list for one entity type. Insertion order is list
/// order; a key appears at most once.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityIndex(Vec<String>);

impl EntityIndex {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build an index from keys, keeping the first occurrence of each.
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = String>) -> Self {
        let mut index = Self::new();
        for key in keys {
            index.insert(key);
        }

        index
    }

    /// Append `key` unless present. Returns whether it was appended.
    pub fn insert(&mut self, key: String) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.0.push(key);

        true
    }

    /// Remove `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != key);

        before != self.0.len()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|existing| existing == key)
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|existing| existing == key)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, InternalError> {
        Ok(serialize(&self.0)?)
    }

    /// Decode stored index bytes. Duplicate keys mean the index is corrupt.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InternalError> {
        let keys: Vec<String> = deserialize(bytes)
            .map_err(|err| InternalError::index_corruption(format!("index decode failed: {err}")))?;

        let index = Self::from_keys(keys.iter().cloned());
        if index.len() != keys.len() {
            return Err(InternalError::index_corruption(
                "index contains duplicate keys",
            ));
        }

        Ok(index)
    }
}

///
/// StoredIndex
///
/// An index read from the store together with its raw bytes, so writers
/// can make their commit conditional on the index not having moved.
///

#[derive(Clone, Debug)]
pub(crate) struct StoredIndex {
    pub(crate) index: EntityIndex,
    pub(crate) raw: Option<Vec<u8>>,
}

impl StoredIndex {
    pub(crate) fn load<S: KvStore + ?Sized>(
        store: &S,
        key: &IndexKey,
    ) -> Result<Self, InternalError> {
        let raw = store.get(&key.to_raw())?;
        let index = match &raw {
            Some(bytes) => EntityIndex::from_bytes(bytes)?,
            None => EntityIndex::new(),
        };

        Ok(Self { index, raw })
    }
}
