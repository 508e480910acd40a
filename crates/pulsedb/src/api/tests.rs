use super::*;
use crate::entity::{Connector, ConnectorStatus, Group, JasminUser, Route};
use pulsedb_core::{db::store::MemoryStore, traits::EntityKind};
use serde_json::json;

fn db() -> Db<MemoryStore> {
    Db::new(MemoryStore::new())
}

#[test]
fn list_seeds_on_first_access() {
    let db = db();

    let response = list::<Group, _>(&db);

    assert_eq!(response.status, ApiStatus::Ok);
    let page = response.into_result().expect("list should succeed");
    assert_eq!(page.items, Group::seed_data());
}

#[test]
fn connector_create_requires_core_fields() {
    let db = db();

    let response = create::<Connector, _>(&db, json!({ "cid": "smppc-09", "host": "h" }));

    assert_eq!(response.status, ApiStatus::BadRequest);
    assert_eq!(
        response.error.as_deref(),
        Some("Missing required connector fields")
    );
    assert!(db.store().is_empty());
}

#[test]
fn connector_create_fills_server_fields() {
    let db = db();

    let response = create::<Connector, _>(
        &db,
        json!({
            "cid": "smppc-09",
            "type": "smppc",
            "host": "10.1.1.1",
            "port": 2775,
            "status": "up",
            "starts": 40,
        }),
    );

    let connector = response.into_result().expect("create should succeed");
    assert!(!connector.id.is_empty());
    assert_eq!(connector.cid, "smppc-09");
    assert_eq!(connector.status, ConnectorStatus::Down);
    assert_eq!(connector.starts, 0);
    assert_eq!(
        db.handle::<Connector>(connector.id.as_str())
            .state()
            .expect("stored"),
        connector
    );
}

#[test]
fn user_create_sets_uid_equal_to_id() {
    let db = db();

    let user = create::<JasminUser, _>(
        &db,
        json!({ "username": "dave", "gid": "g1", "balance": 5.0, "throughput": 1.0, "enabled": true }),
    )
    .into_result()
    .expect("create should succeed");

    assert_eq!(user.id, user.uid);
    assert_eq!(user.username, "dave");
}

#[test]
fn group_create_is_keyed_by_gid_and_rejects_duplicates() {
    let db = db();

    let group = create::<Group, _>(&db, json!({ "gid": "ops", "enabled": true }))
        .into_result()
        .expect("create should succeed");
    assert_eq!(group.id, "ops");

    let again = create::<Group, _>(&db, json!({ "gid": "ops", "enabled": false }));
    assert_eq!(again.status, ApiStatus::BadRequest);
    assert!(
        db.handle::<Group>("ops")
            .state()
            .expect("original kept")
            .enabled
    );
}

#[test]
fn create_with_wrong_field_type_is_bad_request() {
    let db = db();

    let response = create::<Route, _>(&db, json!({ "order": "first" }));

    assert_eq!(response.status, ApiStatus::BadRequest);
    assert!(!response.is_success());
}

#[test]
fn update_of_missing_record_is_not_found() {
    let db = db();

    let response = update::<Route, _>(&db, "nope", json!({ "order": 3 }));

    assert_eq!(response.status, ApiStatus::NotFound);
    assert_eq!(response.error.as_deref(), Some("route not found: nope"));
}

#[test]
fn update_ignores_identity_fields() {
    let db = db();
    list::<Connector, _>(&db);

    let connector = update::<Connector, _>(
        &db,
        "conn-1",
        json!({ "id": "hijack", "cid": "hijack", "port": 9999 }),
    )
    .into_result()
    .expect("update should succeed");

    assert_eq!(connector.id, "conn-1");
    assert_eq!(connector.cid, "smppc-01");
    assert_eq!(connector.port, 9999);
    assert!(!db.handle::<Connector>("hijack").exists().expect("exists"));
}

#[test]
fn delete_reports_not_found_for_missing_record() {
    let db = db();
    list::<Group, _>(&db);

    let deleted = delete::<Group, _>(&db, "g1")
        .into_result()
        .expect("delete should succeed");
    assert_eq!(
        deleted,
        Deleted {
            id: "g1".to_string(),
            deleted: true
        }
    );

    let again = delete::<Group, _>(&db, "g1");
    assert_eq!(again.status, ApiStatus::NotFound);
}

#[test]
fn envelope_serializes_success_flag() {
    let ok = serde_json::to_value(ApiResponse::ok(1)).expect("serialize ok");
    assert_eq!(ok, json!({ "success": true, "data": 1 }));

    let failed: ApiResponse<u8> = ApiResponse::fail(ApiStatus::NotFound, "not found");
    let failed = serde_json::to_value(failed).expect("serialize failure");
    assert_eq!(failed, json!({ "success": false, "error": "not found" }));
}

#[test]
fn resource_paths_are_index_names() {
    assert_eq!(resource_path::<Connector>(), "connectors");
    assert_eq!(resource_path::<JasminUser>(), "jasmin-users");
    assert_eq!(ApiStatus::NotFound.code(), 404);
}
