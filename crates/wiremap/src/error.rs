use thiserror::Error as ThisError;
use wiremap_schema::validate::NameError;

///
/// DeriveError
///
/// Registration-time failures. A registration either commits the full schema
/// and its converter set, or fails here and commits nothing.
///

#[derive(Debug, ThisError)]
pub enum DeriveError {
    #[error("no message variant for {kind} property '{property}' on model class '{model}'")]
    UnsupportedPropertyType {
        model: String,
        property: String,
        kind: String,
    },

    #[error(
        "nested model class '{nested}' referenced by '{model}.{property}' resolves to {registered} registered message schemas; register exactly one or supply an explicit override"
    )]
    UnresolvedNestedType {
        model: String,
        property: String,
        nested: String,
        registered: usize,
    },

    #[error("a message schema named '{name}' is already registered")]
    DuplicateSchemaName { name: String },

    #[error("registry is sealed; registration is only permitted during initialization")]
    Sealed,

    #[error(transparent)]
    Name(#[from] NameError),
}

///
/// ConvertError
///
/// Per-instance conversion failures.
///

#[derive(Debug, ThisError)]
pub enum ConvertError {
    #[error(
        "{count} message schemas are registered for model class '{model}'; pass an explicit schema"
    )]
    AmbiguousSchema { model: String, count: usize },

    #[error("no message schema is registered for model class '{model}'")]
    NoSchemaRegistered { model: String },

    #[error("message schema '{schema}' has no registered converter pair")]
    NoConverterRegistered { schema: String },

    #[error("schema '{schema}' maps model class '{expected}', got a record of '{found}'")]
    SchemaMismatch {
        schema: String,
        expected: String,
        found: String,
    },

    #[error("field '{field}' expects a {expected} value, got {found}")]
    ValueKindMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    DeriveError(#[from] DeriveError),

    #[error(transparent)]
    ConvertError(#[from] ConvertError),
}
