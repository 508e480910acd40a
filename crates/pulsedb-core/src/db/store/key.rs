use crate::model::entity::EntityModel;
use std::fmt::{self, Display};

const DATA_PREFIX: &str = "data";
const INDEX_PREFIX: &str = "index";

///
/// DataKey
///
/// Storage address of one record: `data:{entity_name}:{record_key}`.
/// Entity names never contain `:`, so two types cannot collide even when
/// their record keys coincide.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DataKey {
    entity: &'static str,
    key: String,
}

impl DataKey {
    #[must_use]
    pub fn new(model: &EntityModel, key: impl Into<String>) -> Self {
        Self {
            entity: model.entity_name,
            key: key.into(),
        }
    }

    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn to_raw(&self) -> String {
        format!("{DATA_PREFIX}:{}:{}", self.entity, self.key)
    }
}

impl Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.entity)
    }
}

///
/// IndexKey
///
/// Storage address of one type's membership index: `index:{index_name}`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IndexKey {
    name: &'static str,
}

impl IndexKey {
    #[must_use]
    pub const fn new(model: &EntityModel) -> Self {
        Self {
            name: model.index_name,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn to_raw(&self) -> String {
        format!("{INDEX_PREFIX}:{}", self.name)
    }
}

impl Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
