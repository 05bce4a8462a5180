//! Wiremap runtime: the value universe, record and message instances, schema
//! derivation, and the conversion registry.
//!
//! Downstream users depend on **wiremap**; the design-time descriptor nodes
//! are re-exported from `wiremap-schema` as `wiremap::schema`.

pub mod derive;
pub mod entity;
pub mod error;
pub mod message;
pub mod registry;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;
pub use wiremap_schema as schema;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        derive::DeriveOptions,
        entity::Record,
        message::{Message, MessageValue},
        registry::Registry,
        types::Timestamp,
        value::{Value, ValueEnum},
    };
    pub use wiremap_schema::prelude::*;
}
