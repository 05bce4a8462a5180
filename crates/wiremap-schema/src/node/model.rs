use crate::types::Cardinality;
use derive_more::Display;
use serde::Serialize;
use std::{fmt, sync::Arc};

///
/// ModelClass
///
/// A persisted record type owned by the persistence layer: an ordered list of
/// typed properties. Read-only input once built.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelClass {
    name: String,
    properties: PropertyList,
}

impl ModelClass {
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties: PropertyList { properties },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn properties(&self) -> &PropertyList {
        &self.properties
    }
}

///
/// PropertyList
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyList {
    properties: Vec<Property>,
}

impl PropertyList {
    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == ident)
    }

    #[must_use]
    pub fn index_of(&self, ident: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == ident)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }
}

///
/// Property
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    pub cardinality: Cardinality,
}

impl Property {
    /// Singular, required property.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cardinality: Cardinality::One,
        }
    }

    /// Singular, optional property.
    #[must_use]
    pub fn opt(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cardinality: Cardinality::Opt,
        }
    }

    /// Repeated property (0..N values).
    #[must_use]
    pub fn many(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cardinality: Cardinality::Many,
        }
    }
}

///
/// PropertyKind
///
/// Closed value-kind vocabulary of the persistence layer. `Json` and
/// `GeoPoint` exist in the model vocabulary but have no wire mapping;
/// deriving a schema over them fails.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum PropertyKind {
    Blob,
    Bool,
    Enum(EnumRef),
    Float,
    GeoPoint,
    Int,
    Json,
    LongText,
    Structured(Arc<ModelClass>),
    Text,
    Timestamp,
}

impl PropertyKind {
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    #[must_use]
    pub const fn as_structured(&self) -> Option<&Arc<ModelClass>> {
        if let Self::Structured(model) = self {
            Some(model)
        } else {
            None
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Blob => "Blob",
            Self::Bool => "Bool",
            Self::Enum(_) => "Enum",
            Self::Float => "Float",
            Self::GeoPoint => "GeoPoint",
            Self::Int => "Int",
            Self::Json => "Json",
            Self::LongText => "LongText",
            Self::Structured(_) => "Structured",
            Self::Text => "Text",
            Self::Timestamp => "Timestamp",
        };
        write!(f, "{label}")
    }
}

///
/// EnumRef
/// fully-qualified path of a referenced enum type
///

#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[display("{path}")]
pub struct EnumRef {
    pub path: String,
}

impl EnumRef {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> ModelClass {
        ModelClass::new(
            "Person",
            vec![
                Property::new("name", PropertyKind::Text),
                Property::opt("age", PropertyKind::Int),
                Property::many("tags", PropertyKind::Text),
            ],
        )
    }

    #[test]
    fn test_property_lookup() {
        let model = sample_model();

        let age = model.properties().get("age").unwrap();
        assert_eq!(age.cardinality, Cardinality::Opt);
        assert_eq!(age.kind, PropertyKind::Int);

        assert_eq!(model.properties().index_of("tags"), Some(2));
        assert!(model.properties().get("missing").is_none());
    }

    #[test]
    fn test_enumeration_order_is_declaration_order() {
        let model = sample_model();
        let names: Vec<_> = model.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age", "tags"]);
    }

    #[test]
    fn test_structured_accessor() {
        let nested = Arc::new(sample_model());
        let kind = PropertyKind::Structured(nested.clone());

        assert!(kind.is_structured());
        assert_eq!(kind.as_structured().unwrap().name(), "Person");
        assert!(PropertyKind::Bool.as_structured().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PropertyKind::GeoPoint.to_string(), "GeoPoint");
        assert_eq!(
            PropertyKind::Enum(EnumRef::new("app.Role")).to_string(),
            "Enum"
        );
    }
}
