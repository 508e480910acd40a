//! Result payloads for entity operations.

use serde::{Deserialize, Serialize};

///
/// PageRequest
///
/// `limit: None` means "use the configured default"; the default request
/// returns the full set (capped by the configured maximum).
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl PageRequest {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: None,
            cursor: None,
        }
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

///
/// Page
///
/// Records in index order plus a continuation cursor when more remain.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<E> {
    pub items: Vec<E>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<E> Page<E> {
    #[must_use]
    pub const fn new(items: Vec<E>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<E> {
        self.items
    }
}

///
/// CreateOutcome
///
/// `create` never overwrites; a taken key is reported as a value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CreateOutcome<E> {
    Created(E),
    Duplicate { key: String },
}

impl<E> CreateOutcome<E> {
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The stored record, if one was created.
    #[must_use]
    pub fn created(self) -> Option<E> {
        match self {
            Self::Created(entity) => Some(entity),
            Self::Duplicate { .. } => None,
        }
    }
}

///
/// SeedOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedOutcome {
    /// Seed rows written and the index created.
    Seeded { rows: usize },
    /// The index already existed (possibly seeded by a concurrent caller).
    AlreadySeeded,
    /// The type has no seed rows; nothing written.
    NoSeedData,
    /// Seeding is switched off in configuration.
    Disabled,
}
