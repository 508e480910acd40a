//! ## Crate layout
//! - `core`: the generic entity layer (stores, index, cursors, patches,
//!   config, metrics).
//! - `entity`: the gateway resource types and their seed data.
//! - `api`: call-through handlers and the JSON response envelope.
//! - `error`: the public error taxonomy.
//!
//! The `prelude` module brings the entity vocabulary and the `Db` entry point
//! into scope.

pub use pulsedb_core as core;

pub mod api;
pub mod entity;
pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        api::{ApiResponse, ApiStatus, Resource as _},
        core::{
            config::DbConfig,
            db::{
                Db,
                response::{CreateOutcome, Page, PageRequest, SeedOutcome},
                store::{KvStore, MemoryStore},
            },
            traits::{EntityKind as _, UpdateView as _},
        },
        entity::*,
    };
    pub use serde::{Deserialize, Serialize};
}
