//! Gateway resource types.
//!
//! Each type carries its storage names, initial state (`Default`), key,
//! seed rows, and an update view listing the fields a patch may touch.
//! Identity fields are never part of an update view.

mod connector;
mod filter;
mod group;
mod route;
mod user;
#[cfg(test)]
mod tests;

pub use connector::{Connector, ConnectorStatus, ConnectorType, ConnectorUpdate};
pub use filter::{FilterType, FilterUpdate, MessageFilter};
pub use group::{Group, GroupUpdate};
pub use route::{Route, RouteType, RouteUpdate};
pub use user::{JasminUser, JasminUserUpdate};

use serde::{Deserialize, Deserializer};

/// Deserialize a clearable optional field.
///
/// Paired with `#[serde(default)]`: a missing field stays `None`, an explicit
/// `null` becomes `Some(None)`.
pub(crate) fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
