use crate::types::{Label, Variant};
use serde::Serialize;

///
/// MessageSchema
///
/// Derived wire-message type description: an ordered sequence of field
/// descriptors. Field order is derivation order, not wire-name order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageSchema {
    /// A declared-but-empty schema, handed to `populate` for field derivation.
    #[must_use]
    pub fn shell(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == ident)
    }

    #[must_use]
    pub fn index_of(&self, ident: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == ident)
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

///
/// FieldDescriptor
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: u32,
    pub label: Label,
    pub variant: Variant,

    /// Fully-qualified referenced type name; present exactly for enum and
    /// nested-message fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32, label: Label, variant: Variant) -> Self {
        Self {
            name: name.into(),
            number,
            label,
            variant,
            type_name: None,
        }
    }

    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

///
/// TESTS
///
