//! Observability: in-process counters and the sink abstraction.
//!
//! Registry and query code never touch `metrics` directly; every event
//! flows through a `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{GlobalMetricsSink, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
