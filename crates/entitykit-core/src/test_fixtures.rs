use crate::{
    model::{
        path::PropertyPath,
        property::{Cardinality, PropertyDescriptor, RelationshipKind, StoredType},
    },
    traits::{Path, PersistentModel},
};

///
/// Person
/// Identity paths equal stored names.
///

pub(crate) struct Person;

impl Person {
    pub(crate) const FULL_NAME: PropertyPath<Self, String> = PropertyPath::new("fullName");
    pub(crate) const AGE: PropertyPath<Self, u32> = PropertyPath::new("age");
    pub(crate) const DISPLAY_LABEL: PropertyPath<Self, String> =
        PropertyPath::new("displayLabel");
}

static PERSON_PROPERTIES: [PropertyDescriptor; 2] = [
    PropertyDescriptor::named("fullName", StoredType::Text),
    PropertyDescriptor::named("age", StoredType::Int),
];

impl Path for Person {
    const PATH: &'static str = "fixtures::Person";
}

impl PersistentModel for Person {
    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&PERSON_PROPERTIES)
    }
}

///
/// Pet
/// Renamed entity with a stored name that differs from its identity path
/// and a to-one relationship back to `Person`.
///

pub(crate) struct Pet;

impl Pet {
    pub(crate) const NAME: PropertyPath<Self, String> = PropertyPath::new("name");
    pub(crate) const KIND: PropertyPath<Self, String> = PropertyPath::new("kind");
    pub(crate) const OWNER_NAME: PropertyPath<Self, String> =
        PropertyPath::new("owner.fullName");
}

static PET_PROPERTIES: [PropertyDescriptor; 3] = [
    PropertyDescriptor::named("name", StoredType::Text),
    PropertyDescriptor::new("species", "kind", StoredType::Text).with_original_name("kind"),
    PropertyDescriptor::named(
        "owner",
        StoredType::Relationship(RelationshipKind::new("Person", Cardinality::Opt)),
    ),
];

impl Path for Pet {
    const PATH: &'static str = "fixtures::Pet";
}

impl PersistentModel for Pet {
    const ENTITY_NAME: Option<&'static str> = Some("Animal");
    const ORIGINAL_NAME: Option<&'static str> = Some("Pet");
    const HASH_MODIFIER: Option<&'static str> = Some("v2");

    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&PET_PROPERTIES)
    }
}

///
/// Ghost
/// Declares no schema metadata.
///

pub(crate) struct Ghost;

impl Ghost {
    pub(crate) const NAME: PropertyPath<Self, String> = PropertyPath::new("name");
}

impl Path for Ghost {
    const PATH: &'static str = "fixtures::Ghost";
}

impl PersistentModel for Ghost {}

///
/// Twins
/// Two properties share one identity path.
///

pub(crate) struct Twins;

impl Twins {
    pub(crate) const LABEL: PropertyPath<Self, String> = PropertyPath::new("label");
}

static TWINS_PROPERTIES: [PropertyDescriptor; 2] = [
    PropertyDescriptor::new("label", "label", StoredType::Text),
    PropertyDescriptor::new("labelCopy", "label", StoredType::Text),
];

impl Path for Twins {
    const PATH: &'static str = "fixtures::Twins";
}

impl PersistentModel for Twins {
    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&TWINS_PROPERTIES)
    }
}

///
/// ShadowPerson
/// Different type, same canonical name as `Person`.
///

pub(crate) struct ShadowPerson;

static SHADOW_PROPERTIES: [PropertyDescriptor; 1] =
    [PropertyDescriptor::named("nickname", StoredType::Text)];

impl Path for ShadowPerson {
    const PATH: &'static str = "fixtures::legacy::ShadowPerson";
}

impl PersistentModel for ShadowPerson {
    const ENTITY_NAME: Option<&'static str> = Some("Person");

    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&SHADOW_PROPERTIES)
    }
}

///
/// Kennel
/// To-many relationship whose declared inverse does not point back.
///

pub(crate) struct Kennel;

static KENNEL_PROPERTIES: [PropertyDescriptor; 2] = [
    PropertyDescriptor::named("address", StoredType::Text),
    PropertyDescriptor::named(
        "residents",
        StoredType::Relationship(
            RelationshipKind::new("Animal", Cardinality::Many).with_inverse("owner"),
        ),
    ),
];

impl Path for Kennel {
    const PATH: &'static str = "fixtures::Kennel";
}

impl PersistentModel for Kennel {
    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        Some(&KENNEL_PROPERTIES)
    }
}
