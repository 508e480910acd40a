use super::*;
use pulsedb_core::traits::{EntityKind, EntitySchema, UpdateView};
use serde_json::json;
use std::collections::HashSet;

fn assert_unique_seed_keys<E: EntityKind>() {
    let rows = E::seed_data();
    let keys: HashSet<_> = rows.iter().map(|row| row.key()).collect();

    assert!(!rows.is_empty(), "{} should ship seed rows", E::MODEL.entity_name);
    assert_eq!(keys.len(), rows.len(), "{} seed keys must be unique", E::MODEL.entity_name);
    assert!(keys.iter().all(|key| !key.is_empty()));
}

#[test]
fn seed_rows_have_unique_non_empty_keys() {
    assert_unique_seed_keys::<Connector>();
    assert_unique_seed_keys::<JasminUser>();
    assert_unique_seed_keys::<Group>();
    assert_unique_seed_keys::<Route>();
    assert_unique_seed_keys::<MessageFilter>();
}

#[test]
fn storage_names_match_gateway_resources() {
    let names = [
        (Connector::MODEL.entity_name, Connector::MODEL.index_name),
        (JasminUser::MODEL.entity_name, JasminUser::MODEL.index_name),
        (Group::MODEL.entity_name, Group::MODEL.index_name),
        (Route::MODEL.entity_name, Route::MODEL.index_name),
        (MessageFilter::MODEL.entity_name, MessageFilter::MODEL.index_name),
    ];

    assert_eq!(
        names,
        [
            ("connector", "connectors"),
            ("jasmin-user", "jasmin-users"),
            ("group", "groups"),
            ("route", "routes"),
            ("filter", "filters"),
        ]
    );
}

#[test]
fn initial_states_follow_gateway_defaults() {
    let connector = Connector::default();
    assert_eq!(connector.kind, ConnectorType::Smppc);
    assert_eq!(connector.status, ConnectorStatus::Down);
    assert_eq!(connector.port, 0);
    assert_eq!(connector.username, None);

    assert_eq!(Route::default().kind, RouteType::Static);
    assert_eq!(MessageFilter::default().kind, FilterType::TransparentFilter);
    assert!(!Group::default().enabled);
    assert!(!JasminUser::default().enabled);
}

#[test]
fn group_seed_is_g1() {
    assert_eq!(
        Group::seed_data(),
        vec![Group {
            id: "g1".to_string(),
            gid: "g1".to_string(),
            enabled: true,
        }]
    );
}

#[test]
fn connector_wire_shape() {
    let connector = Connector {
        id: "c1".to_string(),
        cid: "smppc-01".to_string(),
        port: 2775,
        ..Default::default()
    };

    let value = serde_json::to_value(&connector).expect("connector should serialize");
    assert_eq!(value["type"], "smppc");
    assert_eq!(value["status"], "down");
    assert_eq!(value["submit_sm_throughput"], 0.0);
    assert!(value.get("username").is_none());
}

#[test]
fn route_wire_shape_uses_camel_case_and_jasmin_names() {
    let route = Route {
        id: "r1".to_string(),
        kind: RouteType::RandomRoundrobin,
        connector_id: "conn-1".to_string(),
        ..Default::default()
    };

    let value = serde_json::to_value(&route).expect("route should serialize");
    assert_eq!(value["type"], "RandomRoundrobinMORoute");
    assert_eq!(value["connectorId"], "conn-1");
    assert_eq!(RouteType::Standard.to_string(), "DefaultRoute");
}

#[test]
fn connector_update_distinguishes_null_from_missing() {
    let missing: ConnectorUpdate =
        serde_json::from_value(json!({ "port": 9999 })).expect("update should parse");
    assert_eq!(missing.port, Some(9999));
    assert_eq!(missing.username, None);

    let cleared: ConnectorUpdate =
        serde_json::from_value(json!({ "username": null })).expect("update should parse");
    assert_eq!(cleared.username, Some(None));
}

#[test]
fn identity_fields_are_not_patchable() {
    let mut connector = Connector::seed_data().remove(0);
    let update: ConnectorUpdate =
        serde_json::from_value(json!({ "id": "other", "cid": "other", "host": "10.9.9.9" }))
            .expect("unknown fields are ignored");

    connector.merge(update).expect("merge should succeed");

    assert_eq!(connector.id, "conn-1");
    assert_eq!(connector.cid, "smppc-01");
    assert_eq!(connector.host, "10.9.9.9");
}

#[test]
fn route_update_replaces_filter_list_wholesale() {
    let mut route = Route::seed_data().remove(0);

    route
        .merge(RouteUpdate {
            filters: Some(Vec::new()),
            ..Default::default()
        })
        .expect("merge should succeed");

    assert!(route.filters.is_empty());
    assert_eq!(route.order, 10);
}
