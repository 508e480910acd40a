use crate::error::{Error, ErrorKind};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ApiStatus
///
/// HTTP status an adapter should send with an [`ApiResponse`].
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ApiStatus {
    #[default]
    #[display("200 OK")]
    Ok,
    #[display("400 Bad Request")]
    BadRequest,
    #[display("404 Not Found")]
    NotFound,
    #[display("500 Internal Server Error")]
    Internal,
}

impl ApiStatus {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl From<ErrorKind> for ApiStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Duplicate | ErrorKind::InvalidInput => Self::BadRequest,
            ErrorKind::Conflict | ErrorKind::Store | ErrorKind::Internal => Self::Internal,
        }
    }
}

///
/// ApiResponse
///
/// JSON envelope: `{ "success": true, "data": .. }` or
/// `{ "success": false, "error": ".." }`. The status travels alongside and
/// is not serialized.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    pub status: ApiStatus,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            status: ApiStatus::Ok,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn fail(status: ApiStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Collapse the envelope into a `Result` carrying the error message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), _) if self.success => Ok(data),
            (_, Some(error)) => Err(error),
            _ => Err("empty response".to_string()),
        }
    }
}

impl<T> From<Result<T, Error>> for ApiResponse<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(err.kind.into(), err.message),
        }
    }
}

///
/// Deleted
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}
