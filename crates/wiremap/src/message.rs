use crate::value::ValueEnum;
use serde::Serialize;
use std::sync::Arc;
use wiremap_schema::{
    node::MessageSchema,
    types::Label,
};

///
/// MessageValue
///
/// Wire-side value universe: one variant per field variant, plus `List` for
/// repeated transport and `Null` for absent fields.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum MessageValue {
    Bool(bool),
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    Double(f64),
    Enum(ValueEnum),
    Int64(i64),
    List(Vec<Self>),
    Message(Box<Message>),
    Null,
    String(String),
    Uint64(u64),
}

impl MessageValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stable lowercase tag used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::Double(_) => "double",
            Self::Enum(_) => "enum",
            Self::Int64(_) => "int64",
            Self::List(_) => "list",
            Self::Message(_) => "message",
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Uint64(_) => "uint64",
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_message(&self) -> Option<&Message> {
        if let Self::Message(m) = self {
            Some(m)
        } else {
            None
        }
    }
}

///
/// Message
///
/// A wire-message instance. Fields are stored positionally, one slot per
/// field descriptor in the schema's derivation order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    #[serde(skip)]
    schema: Arc<MessageSchema>,

    fields: Vec<MessageValue>,
}

impl Message {
    #[must_use]
    pub fn new(schema: &Arc<MessageSchema>) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|f| {
                if matches!(f.label, Label::Repeated) {
                    MessageValue::List(Vec::new())
                } else {
                    MessageValue::Null
                }
            })
            .collect();

        Self {
            schema: schema.clone(),
            fields,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<MessageSchema> {
        &self.schema
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        self.schema.name()
    }

    ///
    /// ACCESS
    ///

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MessageValue> {
        let index = self.schema.index_of(name)?;
        self.fields.get(index)
    }

    /// Assign a field by wire name; returns false if the schema has no such
    /// field.
    pub fn set(&mut self, name: &str, value: MessageValue) -> bool {
        match self.schema.index_of(name) {
            Some(index) => {
                self.fields[index] = value;
                true
            }
            None => false,
        }
    }

    // Index-based slot access for the registration-built bindings.
    pub(crate) fn slot(&self, index: usize) -> &MessageValue {
        &self.fields[index]
    }

    pub(crate) fn set_slot(&mut self, index: usize, value: MessageValue) {
        self.fields[index] = value;
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use wiremap_schema::{
        node::FieldDescriptor,
        types::{Label, Variant},
    };

    fn schema() -> Arc<MessageSchema> {
        Arc::new(MessageSchema::new(
            "SampleMessage",
            vec![
                FieldDescriptor::new("name", 1, Label::Required, Variant::String),
                FieldDescriptor::new("tags", 2, Label::Repeated, Variant::String),
            ],
        ))
    }

    #[test]
    fn test_fresh_slots() {
        let message = Message::new(&schema());

        assert_eq!(message.get("name"), Some(&MessageValue::Null));
        assert_eq!(message.get("tags"), Some(&MessageValue::List(Vec::new())));
        assert!(message.get("missing").is_none());
    }

    #[test]
    fn test_set_by_name() {
        let mut message = Message::new(&schema());

        assert!(message.set("name", MessageValue::String("Ada".into())));
        assert!(!message.set("missing", MessageValue::Null));
        assert_eq!(
            message.get("name"),
            Some(&MessageValue::String("Ada".into()))
        );
    }
}
