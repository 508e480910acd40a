use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// EventState
/// Ephemeral, in-memory operation counters.
///

#[derive(Debug, Default)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) entities: BTreeMap<String, EntityCounters>,
}

impl EventState {
    const fn new() -> Self {
        Self {
            ops: EventOps::new(),
            entities: BTreeMap::new(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // entrypoints
    pub seed_calls: u64,
    pub list_calls: u64,
    pub create_calls: u64,
    pub exists_calls: u64,
    pub load_calls: u64,
    pub save_calls: u64,
    pub patch_calls: u64,
    pub delete_calls: u64,

    // rows touched
    pub rows_loaded: u64,
    pub rows_written: u64,

    // index maintenance
    pub index_inserts: u64,
    pub index_removes: u64,

    // anomalies
    pub duplicates_rejected: u64,
    pub dangling_index_entries: u64,
    pub commit_retries: u64,
}

impl EventOps {
    const fn new() -> Self {
        Self {
            seed_calls: 0,
            list_calls: 0,
            create_calls: 0,
            exists_calls: 0,
            load_calls: 0,
            save_calls: 0,
            patch_calls: 0,
            delete_calls: 0,
            rows_loaded: 0,
            rows_written: 0,
            index_inserts: 0,
            index_removes: 0,
            duplicates_rejected: 0,
            dangling_index_entries: 0,
            commit_retries: 0,
        }
    }
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub seed_calls: u64,
    pub list_calls: u64,
    pub create_calls: u64,
    pub exists_calls: u64,
    pub load_calls: u64,
    pub save_calls: u64,
    pub patch_calls: u64,
    pub delete_calls: u64,
    pub rows_loaded: u64,
    pub rows_written: u64,
    pub index_inserts: u64,
    pub index_removes: u64,
    pub duplicates_rejected: u64,
    pub dangling_index_entries: u64,
    pub commit_retries: u64,
}

///
/// EventReport
/// Point-in-time copy of the counters.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

static EVENT_STATE: Mutex<EventState> = Mutex::new(EventState::new());

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    f(&mut EVENT_STATE.lock())
}

/// Snapshot all counters.
pub(crate) fn report() -> EventReport {
    let state = EVENT_STATE.lock();

    EventReport {
        ops: state.ops.clone(),
        entities: state.entities.clone(),
    }
}

/// Reset all counters.
pub(crate) fn reset() {
    with_state_mut(|m| *m = EventState::new());
}
