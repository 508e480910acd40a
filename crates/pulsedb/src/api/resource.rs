use crate::{
    entity::{Connector, ConnectorStatus, Group, JasminUser, MessageFilter, Route},
    error::Error,
};
use pulsedb_core::traits::{EntityKind, UpdateView};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use ulid::Ulid;

///
/// Resource
///
/// A gateway entity exposed through the resource API: how a create body
/// becomes a full record, and how an update body is read.
///

pub trait Resource: EntityKind + UpdateView<UpdateViewType: DeserializeOwned> {
    /// Build a complete record from a create request body.
    fn from_create(body: Value) -> Result<Self, Error>;
}

/// Overlay the body's fields onto the type's initial state.
pub(crate) fn initial_with<E: EntityKind>(body: Map<String, Value>) -> Result<E, Error> {
    let mut state = match serde_json::to_value(E::default()) {
        Ok(Value::Object(state)) => state,
        Ok(_) => return Err(Error::bad_request("record is not a JSON object")),
        Err(err) => return Err(err.into()),
    };
    state.extend(body);

    Ok(serde_json::from_value(Value::Object(state))?)
}

fn object(body: Value) -> Result<Map<String, Value>, Error> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(Error::bad_request("request body must be a JSON object")),
    }
}

fn new_id() -> String {
    Ulid::new().to_string()
}

/// True when `field` is absent, null, or an empty string.
fn is_blank(fields: &Map<String, Value>, field: &str) -> bool {
    match fields.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

impl Resource for Connector {
    fn from_create(body: Value) -> Result<Self, Error> {
        let fields = object(body)?;
        if ["cid", "type", "host"]
            .iter()
            .any(|field| is_blank(&fields, field))
            || matches!(fields.get("port"), None | Some(Value::Null))
        {
            return Err(Error::bad_request("Missing required connector fields"));
        }

        let mut connector: Self = initial_with(fields)?;
        connector.id = new_id();
        connector.status = ConnectorStatus::Down;
        connector.starts = 0;
        connector.stops = 0;
        connector.submit_sm_throughput = 0.0;

        Ok(connector)
    }
}

impl Resource for JasminUser {
    fn from_create(body: Value) -> Result<Self, Error> {
        let mut user: Self = initial_with(object(body)?)?;
        let uid = new_id();
        user.id.clone_from(&uid);
        user.uid = uid;

        Ok(user)
    }
}

impl Resource for Group {
    fn from_create(body: Value) -> Result<Self, Error> {
        let mut group: Self = initial_with(object(body)?)?;
        if group.gid.is_empty() {
            return Err(Error::bad_request("Missing required group field: gid"));
        }
        group.id.clone_from(&group.gid);

        Ok(group)
    }
}

impl Resource for Route {
    fn from_create(body: Value) -> Result<Self, Error> {
        let mut route: Self = initial_with(object(body)?)?;
        route.id = new_id();

        Ok(route)
    }
}

impl Resource for MessageFilter {
    fn from_create(body: Value) -> Result<Self, Error> {
        let mut filter: Self = initial_with(object(body)?)?;
        filter.id = new_id();

        Ok(filter)
    }
}
