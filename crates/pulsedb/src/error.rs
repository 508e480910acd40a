use derive_more::Display;
use pulsedb_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Malformed or incomplete request payload.
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, ErrorOrigin::Request, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, ErrorOrigin::Entity, message)
    }

    pub(crate) fn duplicate(entity: &str, key: &str) -> Self {
        Self::new(
            ErrorKind::Duplicate,
            ErrorOrigin::Entity,
            format!("{entity} already exists: {key}"),
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (err.class, err.origin) {
            (ErrorClass::NotFound, _) => ErrorKind::NotFound,
            (ErrorClass::Conflict, _) => ErrorKind::Conflict,
            (ErrorClass::InvalidInput, _) => ErrorKind::InvalidInput,
            (ErrorClass::Corruption, _) | (ErrorClass::Internal, CoreErrorOrigin::Store) => {
                ErrorKind::Store
            }
            (ErrorClass::Internal, _) => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::bad_request(format!("invalid request body: {err}"))
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and HTTP adapters.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Target record does not exist.
    NotFound,

    /// A record with the same key already exists.
    Duplicate,

    /// Request payload, patch, or cursor is malformed.
    InvalidInput,

    /// Concurrent writers kept invalidating this write.
    Conflict,

    /// Backend failure or stored data that no longer decodes.
    Store,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers and HTTP adapters.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Cursor,
    Entity,
    Index,
    Patch,
    Request,
    Serialize,
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Cursor => Self::Cursor,
            CoreErrorOrigin::Entity => Self::Entity,
            CoreErrorOrigin::Index => Self::Index,
            CoreErrorOrigin::Patch => Self::Patch,
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}
