mod update;

pub use update::UpdateView;

pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use std::{default::Default, fmt::Debug};

use crate::model::entity::EntityModel;

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================
//
// These traits describe *what an entity is*, not how it is stored.
//

///
/// Path
/// Fully-qualified type path, used in diagnostics.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntitySchema
///
/// Declared per-type facts: key-space name and index name.
///

pub trait EntitySchema: Path {
    const MODEL: &'static EntityModel;
}

///
/// TypeKind
///
/// Any record shape the store can persist.
///

pub trait TypeKind:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> TypeKind for T where
    T: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

///
/// EntityKind
///
/// Fully runtime-bound entity: schema facts, record shape, key derivation,
/// patch support and optional seed rows.
///
/// `Default` is the initial state of a fresh record.
///

pub trait EntityKind: EntitySchema + TypeKind + UpdateView {
    /// Derive the unique record key. Must be deterministic.
    fn key(&self) -> String;

    /// Default rows inserted once when the type's index has never existed.
    #[must_use]
    fn seed_data() -> Vec<Self> {
        Vec::new()
    }
}
