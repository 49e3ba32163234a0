//! Metrics sink boundary.
//!
//! Registry and query logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::obs::metrics::{self, EventReport};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    DescriptorBuilt {
        entity_path: &'static str,
    },
    DescriptorCacheHit {
        entity_path: &'static str,
    },
    MissingSchema {
        entity_path: &'static str,
    },
    FetchBuilt {
        entity_path: &'static str,
        schema_sort_keys: u64,
        structural_sort_keys: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default sink; writes into the process-wide counters.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::DescriptorBuilt { .. } => {
                m.ops.descriptors_built = m.ops.descriptors_built.saturating_add(1);
            }
            MetricsEvent::DescriptorCacheHit { entity_path } => {
                m.ops.descriptor_cache_hits = m.ops.descriptor_cache_hits.saturating_add(1);

                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.descriptor_cache_hits = entry.descriptor_cache_hits.saturating_add(1);
            }
            MetricsEvent::MissingSchema { .. } => {
                m.ops.missing_schema = m.ops.missing_schema.saturating_add(1);
            }
            MetricsEvent::FetchBuilt {
                entity_path,
                schema_sort_keys,
                structural_sort_keys,
            } => {
                m.ops.fetches_built = m.ops.fetches_built.saturating_add(1);
                m.ops.schema_sort_keys = m.ops.schema_sort_keys.saturating_add(schema_sort_keys);
                m.ops.structural_sort_keys = m
                    .ops
                    .structural_sort_keys
                    .saturating_add(structural_sort_keys);

                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.fetches_built = entry.fetches_built.saturating_add(1);
                entry.structural_sort_keys = entry
                    .structural_sort_keys
                    .saturating_add(structural_sort_keys);
            }
        });
    }
}

/// Snapshot the global counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset the global counters.
pub fn metrics_reset_all() {
    metrics::reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global state is shared across test threads; assert on deltas of an
    // entity path no other test uses.
    #[test]
    fn global_sink_accumulates_per_entity_counters() {
        const PATH: &str = "sink_tests::Widget";
        let sink = GlobalMetricsSink;

        sink.record(MetricsEvent::FetchBuilt {
            entity_path: PATH,
            schema_sort_keys: 1,
            structural_sort_keys: 2,
        });
        sink.record(MetricsEvent::DescriptorCacheHit { entity_path: PATH });

        let report = metrics_report();
        let entry = report
            .entities
            .get(PATH)
            .expect("entity counters should be present after recording");

        assert_eq!(entry.fetches_built, 1);
        assert_eq!(entry.structural_sort_keys, 2);
        assert_eq!(entry.descriptor_cache_hits, 1);
    }
}
