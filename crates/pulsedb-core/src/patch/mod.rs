//! Top-level field merge for partial entity updates.
//!
//! A patch replaces whole fields. Nested values (lists, embedded structs)
//! are never merged element-wise.

mod error;
mod scalar;
#[cfg(test)]
mod tests;

pub use error::MergePatchError;
pub use scalar::{merge_field, merge_option};
