//! Resource API: one call-through handler per CRUD route, generic over the
//! gateway resource type.
//!
//! An HTTP router maps `GET/POST /api/{index_name}` and
//! `PUT/DELETE /api/{index_name}/:id` onto these functions and sends
//! [`ApiResponse::status`] with the serialized envelope.

mod resource;
mod response;
#[cfg(test)]
mod tests;

pub use resource::Resource;
pub use response::{ApiResponse, ApiStatus, Deleted};

use crate::error::Error;
use pulsedb_core::db::{
    Db,
    response::{CreateOutcome, Page, PageRequest},
    store::KvStore,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Route path segment for a resource type.
#[must_use]
pub const fn resource_path<R: Resource>() -> &'static str {
    R::MODEL.index_name
}

/// Seed on first access, then return every record in index order.
pub fn list<R: Resource, S: KvStore>(db: &Db<S>) -> ApiResponse<Page<R>> {
    list_page(db, PageRequest::new())
}

/// Seed on first access, then return one page.
pub fn list_page<R: Resource, S: KvStore>(db: &Db<S>, request: PageRequest) -> ApiResponse<Page<R>> {
    respond::<R, _>("list", || {
        let entities = db.entities::<R>();
        entities.ensure_seed()?;

        Ok(entities.list(request)?)
    })
}

/// Build a record from `body` and store it. A taken key is a bad request.
pub fn create<R: Resource, S: KvStore>(db: &Db<S>, body: Value) -> ApiResponse<R> {
    respond::<R, _>("create", || {
        let record = R::from_create(body)?;

        match db.entities::<R>().create(record)? {
            CreateOutcome::Created(record) => Ok(record),
            CreateOutcome::Duplicate { key } => Err(Error::duplicate(R::MODEL.entity_name, &key)),
        }
    })
}

/// Apply the supplied fields of `body` to the record at `id`.
pub fn update<R: Resource, S: KvStore>(db: &Db<S>, id: &str, body: Value) -> ApiResponse<R> {
    respond::<R, _>("update", || {
        let handle = db.handle::<R>(id);
        if !handle.exists()? {
            return Err(not_found::<R>(id));
        }
        let patch: R::UpdateViewType = serde_json::from_value(body)?;

        Ok(handle.patch(patch)?)
    })
}

/// Remove the record at `id`.
pub fn delete<R: Resource, S: KvStore>(db: &Db<S>, id: &str) -> ApiResponse<Deleted> {
    respond::<R, _>("delete", || {
        if !db.entities::<R>().delete(id)? {
            return Err(not_found::<R>(id));
        }

        Ok(Deleted {
            id: id.to_string(),
            deleted: true,
        })
    })
}

fn not_found<R: Resource>(id: &str) -> Error {
    Error::not_found(format!("{} not found: {id}", R::MODEL.entity_name))
}

fn respond<R: Resource, T>(op: &'static str, f: impl FnOnce() -> Result<T, Error>) -> ApiResponse<T> {
    let result = f();
    if let Err(err) = &result {
        let status = ApiStatus::from(err.kind);
        if status == ApiStatus::Internal {
            warn!(entity = R::MODEL.entity_name, op, kind = %err.kind, error = %err, "request failed");
        } else {
            debug!(entity = R::MODEL.entity_name, op, status = %status, error = %err, "request rejected");
        }
    }

    result.into()
}
