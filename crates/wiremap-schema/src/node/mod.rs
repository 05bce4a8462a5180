mod message;
mod model;

pub use message::{FieldDescriptor, MessageSchema};
pub use model::{EnumRef, ModelClass, Property, PropertyKind, PropertyList};
