use crate::{
    db::store::{CommitOutcome, DataKey, IndexKey, KvStore, MemoryStore, WriteBatch},
    model::entity::EntityModel,
};

static CONNECTOR_MODEL: EntityModel =
    EntityModel::new("store_tests::Connector", "connector", "connectors");
static ROUTE_MODEL: EntityModel = EntityModel::new("store_tests::Route", "route", "routes");

#[test]
fn storage_keys_are_prefixed_by_type() {
    let connector = DataKey::new(&CONNECTOR_MODEL, "c1");
    let route = DataKey::new(&ROUTE_MODEL, "c1");

    assert_eq!(connector.to_raw(), "data:connector:c1");
    assert_ne!(connector.to_raw(), route.to_raw());
    assert_eq!(IndexKey::new(&CONNECTOR_MODEL).to_raw(), "index:connectors");
}

#[test]
fn record_keys_cannot_reach_the_index_namespace() {
    let sneaky = DataKey::new(&CONNECTOR_MODEL, "index:connectors");

    assert_ne!(sneaky.to_raw(), IndexKey::new(&CONNECTOR_MODEL).to_raw());
}

#[test]
fn batch_applies_all_writes_when_preconditions_hold() {
    let store = MemoryStore::new();
    store.insert_raw("b", vec![2]);

    let outcome = store
        .commit(
            WriteBatch::new()
                .expect_absent("a")
                .expect_present("b")
                .expect_value("b", Some(vec![2]))
                .put("a", vec![1])
                .delete("b"),
        )
        .expect("commit should succeed");

    assert_eq!(outcome, CommitOutcome::Committed);
    assert_eq!(store.get("a").expect("get a"), Some(vec![1]));
    assert_eq!(store.get("b").expect("get b"), None);
}

#[test]
fn failed_precondition_writes_nothing() {
    let store = MemoryStore::new();
    store.insert_raw("guard", vec![9]);

    let outcome = store
        .commit(
            WriteBatch::new()
                .put("a", vec![1])
                .expect_value("guard", Some(vec![8])),
        )
        .expect("commit should run");

    assert_eq!(
        outcome,
        CommitOutcome::Conflict {
            key: "guard".to_string()
        }
    );
    assert!(!store.contains("a").expect("contains should succeed"));
    assert_eq!(store.len(), 1);
}

#[test]
fn expect_value_none_means_absent() {
    let store = MemoryStore::new();

    let outcome = store
        .commit(WriteBatch::new().expect_value("idx", None).put("idx", vec![]))
        .expect("commit should succeed");
    assert!(outcome.is_committed());

    let outcome = store
        .commit(WriteBatch::new().expect_value("idx", None).put("idx", vec![1]))
        .expect("commit should run");
    assert!(!outcome.is_committed());
    assert_eq!(store.get("idx").expect("get idx"), Some(vec![]));
}

#[test]
fn shared_handles_see_the_same_state() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let other = std::sync::Arc::clone(&store);

    other
        .commit(WriteBatch::new().put("k", vec![1]))
        .expect("commit should succeed");

    assert!(store.contains("k").expect("contains should succeed"));
}
