mod binding;


pub(crate) use binding::{FieldBinding, FieldOp};

use crate::{error::DeriveError, registry::Registry};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use wiremap_schema::{
    MAX_FIELD_NAME_LEN, MAX_SCHEMA_NAME_LEN,
    node::{FieldDescriptor, MessageSchema, ModelClass, PropertyKind},
    types::{FieldNaming, Label, Variant},
    validate::{validate_ident, validate_unique},
};

///
/// DeriveOptions
///

#[derive(Clone, Debug, Default)]
pub struct DeriveOptions {
    /// Synthesize an `id` field (uint64, field number 1) serialized from the
    /// record identity. Identity is never deserialized.
    pub identity_field: bool,

    /// Wire field naming transform.
    pub naming: FieldNaming,

    /// Nested model-class name → explicit message schema name, for nested
    /// properties whose model has zero or several registered schemas.
    pub overrides: BTreeMap<String, String>,

    /// When non-empty, restricts derivation to exactly these properties.
    pub include_only: BTreeSet<String>,

    /// Drops these properties; applied after `include_only`.
    pub exclude: BTreeSet<String>,
}

impl DeriveOptions {
    #[must_use]
    pub const fn with_identity(mut self) -> Self {
        self.identity_field = true;
        self
    }

    #[must_use]
    pub const fn camel_case(mut self) -> Self {
        self.naming = FieldNaming::CamelCase;
        self
    }

    #[must_use]
    pub fn override_nested(mut self, model: impl Into<String>, schema: impl Into<String>) -> Self {
        self.overrides.insert(model.into(), schema.into());
        self
    }

    #[must_use]
    pub fn include_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_only = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }
}

///
/// DerivedSchema
/// a fully derived schema plus its converter set, ready to commit
///

pub(crate) struct DerivedSchema {
    pub schema: MessageSchema,
    pub bindings: Vec<FieldBinding>,
}

/// Derive a message schema for a model class.
///
/// Walks the surviving properties in enumeration order, assigning dense
/// 1-based field numbers (identity first when enabled) and dispatching each
/// property kind to its wire variant and converter op. Fails without side
/// effects; the caller commits the result atomically.
pub(crate) fn derive_schema(
    registry: &Registry,
    name: &str,
    model: &Arc<ModelClass>,
    options: &DeriveOptions,
) -> Result<DerivedSchema, DeriveError> {
    validate_ident("schema", name, MAX_SCHEMA_NAME_LEN)?;

    let mut fields: Vec<FieldDescriptor> = Vec::new();
    let mut bindings: Vec<FieldBinding> = Vec::new();
    let mut number: u32 = 0;

    if options.identity_field {
        number += 1;
        fields.push(FieldDescriptor::new(
            options.naming.apply("id"),
            number,
            Label::Optional,
            Variant::Uint64,
        ));
        bindings.push(FieldBinding::identity(fields.len() - 1));
    }

    for (prop_index, prop) in model.properties().iter().enumerate() {
        if !options.include_only.is_empty() && !options.include_only.contains(&prop.name) {
            continue;
        }
        if options.exclude.contains(&prop.name) {
            continue;
        }

        number += 1;
        let wire_name = options.naming.apply(&prop.name);
        validate_ident("field", &wire_name, MAX_FIELD_NAME_LEN)?;

        let (variant, op, type_name) = match &prop.kind {
            PropertyKind::Int => (Variant::Int64, FieldOp::Int, None),
            PropertyKind::Float => (Variant::Double, FieldOp::Float, None),
            PropertyKind::Bool => (Variant::Bool, FieldOp::Bool, None),
            PropertyKind::Text | PropertyKind::LongText => {
                (Variant::String, FieldOp::Text, None)
            }
            PropertyKind::Blob => (Variant::Bytes, FieldOp::Blob, None),
            PropertyKind::Enum(enum_ref) => {
                (Variant::Enum, FieldOp::Enum, Some(enum_ref.path.clone()))
            }
            PropertyKind::Timestamp => (Variant::Uint64, FieldOp::Timestamp, None),
            PropertyKind::Structured(nested) => {
                let schema_name = resolve_nested(registry, model, &prop.name, nested, options)?;
                let op = FieldOp::Nested {
                    schema: schema_name.clone(),
                };
                (Variant::Message, op, Some(schema_name))
            }
            kind @ (PropertyKind::Json | PropertyKind::GeoPoint) => {
                return Err(DeriveError::UnsupportedPropertyType {
                    model: model.name().to_string(),
                    property: prop.name.clone(),
                    kind: kind.to_string(),
                });
            }
        };

        let mut descriptor =
            FieldDescriptor::new(wire_name, number, prop.cardinality.label(), variant);
        if let Some(type_name) = type_name {
            descriptor = descriptor.with_type_name(type_name);
        }

        fields.push(descriptor);
        bindings.push(FieldBinding::property(
            prop_index,
            fields.len() - 1,
            prop.cardinality.is_many(),
            op,
        ));
    }

    validate_unique("field", fields.iter().map(|f| f.name.as_str()))?;

    Ok(DerivedSchema {
        schema: MessageSchema::new(name, fields),
        bindings,
    })
}

/// Resolve the message schema a nested structured property converts through:
/// explicit override first, then the sole registered schema of the nested
/// model class.
fn resolve_nested(
    registry: &Registry,
    model: &Arc<ModelClass>,
    property: &str,
    nested: &Arc<ModelClass>,
    options: &DeriveOptions,
) -> Result<String, DeriveError> {
    if let Some(schema_name) = options.overrides.get(nested.name()) {
        if registry.schema(schema_name).is_some() {
            return Ok(schema_name.clone());
        }
        return Err(DeriveError::UnresolvedNestedType {
            model: model.name().to_string(),
            property: property.to_string(),
            nested: nested.name().to_string(),
            registered: 0,
        });
    }

    let names = registry.schema_names_for(nested.name());
    match names {
        [sole] => Ok(sole.clone()),
        _ => Err(DeriveError::UnresolvedNestedType {
            model: model.name().to_string(),
            property: property.to_string(),
            nested: nested.name().to_string(),
            registered: names.len(),
        }),
    }
}
