//! Shared model-class fixtures for the derivation and conversion tests.

use crate::{entity::Record, value::Value};
use std::sync::Arc;
use wiremap_schema::node::{EnumRef, ModelClass, Property, PropertyKind};

pub(crate) fn person_model() -> Arc<ModelClass> {
    Arc::new(ModelClass::new(
        "Person",
        vec![
            Property::new("name", PropertyKind::Text),
            Property::opt("age", PropertyKind::Int),
            Property::opt("score", PropertyKind::Float),
            Property::new("active", PropertyKind::Bool),
            Property::opt("avatar", PropertyKind::Blob),
            Property::opt("role", PropertyKind::Enum(EnumRef::new("app.Role"))),
            Property::opt("created_at", PropertyKind::Timestamp),
            Property::many("tags", PropertyKind::Text),
        ],
    ))
}

pub(crate) fn address_model() -> Arc<ModelClass> {
    Arc::new(ModelClass::new(
        "Address",
        vec![
            Property::new("street", PropertyKind::Text),
            Property::new("city", PropertyKind::Text),
            Property::opt("zip", PropertyKind::Text),
        ],
    ))
}

pub(crate) fn contact_model(address: &Arc<ModelClass>) -> Arc<ModelClass> {
    Arc::new(ModelClass::new(
        "Contact",
        vec![
            Property::new("name", PropertyKind::Text),
            Property::opt("home", PropertyKind::Structured(address.clone())),
            Property::many("addresses", PropertyKind::Structured(address.clone())),
        ],
    ))
}

pub(crate) fn tracker_model() -> Arc<ModelClass> {
    Arc::new(ModelClass::new(
        "Tracker",
        vec![
            Property::new("label", PropertyKind::Text),
            Property::opt("location", PropertyKind::GeoPoint),
        ],
    ))
}

/// Assign a property, panicking on unknown names so fixture typos fail loud.
pub(crate) fn set(record: &mut Record, name: &str, value: impl Into<Value>) {
    assert!(record.set(name, value), "unknown property '{name}'");
}

pub(crate) fn address_record(
    model: &Arc<ModelClass>,
    street: &str,
    city: &str,
) -> Record {
    let mut record = Record::new(model);
    set(&mut record, "street", street);
    set(&mut record, "city", city);
    record
}
