//! Global counters are process-wide, so every assertion here lives in one
//! test in its own binary.

use entitykit_core::{
    model::{
        path::PropertyPath,
        property::{PropertyDescriptor, StoredType},
    },
    obs::{metrics_report, metrics_reset_all},
    query::{OrderDirection, base_fetch, fetch},
    schema::SchemaRegistry,
    traits::{Path, PersistentModel},
};

struct Invoice;

impl Invoice {
    const NUMBER: PropertyPath<Self, u64> = PropertyPath::new("number");
    const CUSTOMER: PropertyPath<Self, String> = PropertyPath::new("customer.name");
}

static INVOICE_PROPERTIES: [PropertyDescriptor; 2] = [
    PropertyDescriptor::named("number", StoredType::Uint),
    PropertyDescriptor::named("customer", StoredType::to_one("Customer")),
];

impl Path for Invoice {
    const PATH: &'static str = "metrics::Invoice";
}

impl PersistentModel for Invoice {
    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&INVOICE_PROPERTIES)
    }
}

struct Draft;

impl Path for Draft {
    const PATH: &'static str = "metrics::Draft";
}

impl PersistentModel for Draft {}

#[test]
fn registry_and_builder_feed_global_counters() {
    metrics_reset_all();
    let registry = SchemaRegistry::new();

    registry.register::<Invoice>().expect("invoice should build");
    fetch(&registry, None, Invoice::NUMBER, OrderDirection::Asc, None, None)
        .expect("fetch should build");
    fetch(&registry, None, Invoice::CUSTOMER, OrderDirection::Desc, None, Some(5))
        .expect("fetch should build");
    assert!(base_fetch::<Draft>(&registry).is_err());

    let report = metrics_report();
    assert_eq!(report.ops.descriptors_built, 1);
    assert_eq!(report.ops.descriptor_cache_hits, 2);
    assert_eq!(report.ops.missing_schema, 1);
    assert_eq!(report.ops.fetches_built, 2);
    assert_eq!(report.ops.schema_sort_keys, 1);
    assert_eq!(report.ops.structural_sort_keys, 1);

    let invoice = report
        .entities
        .get("metrics::Invoice")
        .expect("invoice counters should be present");
    assert_eq!(invoice.fetches_built, 2);
    assert_eq!(invoice.structural_sort_keys, 1);

    let json = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(json["ops"]["fetches_built"], 2);

    metrics_reset_all();
    let report = metrics_report();
    assert_eq!(report.ops.fetches_built, 0);
    assert!(report.entities.is_empty());
}
