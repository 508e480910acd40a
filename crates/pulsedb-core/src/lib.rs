//! Core runtime for PulseDB: entity traits, the key-value store seam, the
//! per-type membership index, patch merging, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod patch;
pub mod serialize;
pub mod traits;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::entity::EntityModel,
        traits::{EntityKind, EntitySchema, Path, UpdateView},
    };
}
