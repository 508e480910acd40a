use thiserror::Error as ThisError;

///
/// MergePatchError
///
/// Structured failures for user-driven patch application.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MergePatchError {
    #[error("patch changed the record key: expected '{expected}', found '{found}'")]
    KeyChanged { expected: String, found: String },
}
