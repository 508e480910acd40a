//! Observability: operation counters and the sink boundary they flow through.
//!
//! Entity-layer code never touches `metrics` state directly; it emits
//! [`MetricsEvent`]s through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{
    MetricsEvent, MetricsSink, OpKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
