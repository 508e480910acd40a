//! Metrics sink boundary.
//!
//! All instrumentation flows through [`MetricsEvent`] and [`MetricsSink`].
//! This module is the only bridge between entity operations and the
//! global counters.

use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// OpKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    Seed,
    List,
    Create,
    Exists,
    Load,
    Save,
    Patch,
    Delete,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    OpStart {
        kind: OpKind,
        entity: &'static str,
    },
    RowsLoaded {
        entity: &'static str,
        rows: u64,
    },
    RowsWritten {
        entity: &'static str,
        rows: u64,
    },
    IndexDelta {
        entity: &'static str,
        inserts: u64,
        removes: u64,
    },
    DuplicateRejected {
        entity: &'static str,
    },
    DanglingIndexEntry {
        entity: &'static str,
    },
    CommitRetry {
        entity: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-wide sink writing into the global counters.
/// Used whenever no scoped override is installed on the current thread.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::OpStart { kind, entity } => {
                let entry = m.entities.entry(entity.to_string()).or_default();
                let (global, local) = match kind {
                    OpKind::Seed => (&mut m.ops.seed_calls, &mut entry.seed_calls),
                    OpKind::List => (&mut m.ops.list_calls, &mut entry.list_calls),
                    OpKind::Create => (&mut m.ops.create_calls, &mut entry.create_calls),
                    OpKind::Exists => (&mut m.ops.exists_calls, &mut entry.exists_calls),
                    OpKind::Load => (&mut m.ops.load_calls, &mut entry.load_calls),
                    OpKind::Save => (&mut m.ops.save_calls, &mut entry.save_calls),
                    OpKind::Patch => (&mut m.ops.patch_calls, &mut entry.patch_calls),
                    OpKind::Delete => (&mut m.ops.delete_calls, &mut entry.delete_calls),
                };
                *global = global.saturating_add(1);
                *local = local.saturating_add(1);
            }
            MetricsEvent::RowsLoaded { entity, rows } => {
                m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.rows_loaded = entry.rows_loaded.saturating_add(rows);
            }
            MetricsEvent::RowsWritten { entity, rows } => {
                m.ops.rows_written = m.ops.rows_written.saturating_add(rows);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.rows_written = entry.rows_written.saturating_add(rows);
            }
            MetricsEvent::IndexDelta {
                entity,
                inserts,
                removes,
            } => {
                m.ops.index_inserts = m.ops.index_inserts.saturating_add(inserts);
                m.ops.index_removes = m.ops.index_removes.saturating_add(removes);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.index_inserts = entry.index_inserts.saturating_add(inserts);
                entry.index_removes = entry.index_removes.saturating_add(removes);
            }
            MetricsEvent::DuplicateRejected { entity } => {
                m.ops.duplicates_rejected = m.ops.duplicates_rejected.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.duplicates_rejected = entry.duplicates_rejected.saturating_add(1);
            }
            MetricsEvent::DanglingIndexEntry { entity } => {
                m.ops.dangling_index_entries = m.ops.dangling_index_entries.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.dangling_index_entries = entry.dangling_index_entries.saturating_add(1);
            }
            MetricsEvent::CommitRetry { entity } => {
                m.ops.commit_retries = m.ops.commit_retries.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.commit_retries = entry.commit_retries.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current global counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all global counters.
pub fn metrics_reset_all() {
    metrics::reset();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
