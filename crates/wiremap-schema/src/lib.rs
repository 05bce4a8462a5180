pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for message schema identifiers.
pub const MAX_SCHEMA_NAME_LEN: usize = 64;

/// Maximum length for wire field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::validate::NameError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        MAX_FIELD_NAME_LEN, MAX_SCHEMA_NAME_LEN,
        node::*,
        types::{Cardinality, FieldNaming, Label, Variant},
        validate::NameError,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    NameError(#[from] NameError),
}
