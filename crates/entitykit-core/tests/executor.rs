use entitykit_core::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    model::{
        path::PropertyPath,
        property::{PropertyDescriptor, StoredType},
    },
    query::{FetchBuilder, FetchSpecification, FieldRef, OrderDirection, QueryError, SortKey},
    schema::SchemaRegistry,
    traits::{FetchExecutor, Path, PersistentModel},
};
use std::sync::Once;
use thiserror::Error as ThisError;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

///
/// Book
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct Book {
    title: String,
    pages: u32,
}

impl Book {
    const TITLE: PropertyPath<Self, String> = PropertyPath::new("title");
    const PAGES: PropertyPath<Self, u32> = PropertyPath::new("pages");
}

static BOOK_PROPERTIES: [PropertyDescriptor; 2] = [
    PropertyDescriptor::new("bookTitle", "title", StoredType::Text),
    PropertyDescriptor::named("pages", StoredType::Int),
];

impl Path for Book {
    const PATH: &'static str = "executor::Book";
}

impl PersistentModel for Book {
    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&BOOK_PROPERTIES)
    }
}

///
/// StoreError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
enum StoreError {
    #[error("store unavailable")]
    Unavailable,
}

///
/// MemoryStore
/// Records every specification it receives and serves canned rows.
///

struct MemoryStore {
    rows: Vec<Book>,
    online: bool,
    seen: std::sync::Mutex<Vec<FetchSpecification>>,
}

impl MemoryStore {
    fn new(online: bool) -> Self {
        Self {
            rows: vec![
                Book {
                    title: "Dune".to_string(),
                    pages: 412,
                },
                Book {
                    title: "Emma".to_string(),
                    pages: 474,
                },
            ],
            online,
            seen: std::sync::Mutex::default(),
        }
    }
}

impl FetchExecutor<Book> for MemoryStore {
    type Error = StoreError;

    fn execute(&self, spec: FetchSpecification) -> Result<Vec<Book>, Self::Error> {
        if !self.online {
            return Err(StoreError::Unavailable);
        }

        let limit = spec.limit.map_or(usize::MAX, |n| n as usize);
        self.seen.lock().expect("seen lock").push(spec);

        Ok(self.rows.iter().take(limit).cloned().collect())
    }
}

fn spec(registry: &SchemaRegistry) -> FetchSpecification {
    FetchBuilder::<Book>::new(registry)
        .filter(FieldRef::new("pages").gt(100))
        .order_by(Book::TITLE)
        .sort_by(Book::PAGES, OrderDirection::Desc)
        .limit(1)
        .build()
        .expect("book spec should build")
}

#[test]
fn executor_receives_resolved_specification() {
    init_tracing();
    let registry = SchemaRegistry::new();
    let store = MemoryStore::new(true);

    let books = store.execute(spec(&registry)).expect("store is online");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].pages, 412);
    assert_eq!(books[0].title, "Dune");

    let seen = store.seen.lock().expect("seen lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].entity_name, "Book");
    assert_eq!(
        seen[0].sort_keys.iter().map(SortKey::as_pair).collect::<Vec<_>>(),
        vec![("bookTitle", true), ("pages", false)]
    );
}

#[test]
fn executor_errors_pass_through_unchanged() {
    init_tracing();
    let registry = SchemaRegistry::new();
    let store = MemoryStore::new(false);

    let err = store
        .execute(spec(&registry))
        .expect_err("offline store should fail");

    assert_eq!(err, StoreError::Unavailable);
}

#[test]
fn query_errors_classify_at_the_boundary() {
    struct Pamphlet;

    impl Path for Pamphlet {
        const PATH: &'static str = "executor::Pamphlet";
    }

    impl PersistentModel for Pamphlet {}

    init_tracing();
    let registry = SchemaRegistry::new();
    let err: QueryError = FetchBuilder::<Pamphlet>::new(&registry)
        .build()
        .expect_err("pamphlet declares no schema");

    let internal = InternalError::from(err);
    assert_eq!(internal.class, ErrorClass::NotFound);
    assert_eq!(internal.origin, ErrorOrigin::Schema);
    assert!(internal.is_not_found());
    assert!(internal.display_with_class().starts_with("schema:not_found:"));
}

#[test]
fn specification_serializes_for_diagnostics() {
    init_tracing();
    let registry = SchemaRegistry::new();
    let json = serde_json::to_value(spec(&registry)).expect("spec should serialize");

    assert_eq!(json["entity_name"], "Book");
    assert_eq!(json["limit"], 1);
    assert_eq!(json["sort_keys"][0]["field"], "bookTitle");
    assert_eq!(json["sort_keys"][1]["direction"], "Desc");
}
