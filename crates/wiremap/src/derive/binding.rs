use crate::{
    entity::Record,
    error::ConvertError,
    message::{Message, MessageValue},
    registry::Registry,
    types::Timestamp,
    value::Value,
};

///
/// FieldBinding
///
/// One data-carrying converter descriptor: property slot, field slot, and the
/// conversion op. Built once at registration, interpreted per instance.
/// No name lookup happens at conversion time.
///

#[derive(Clone, Debug)]
pub(crate) enum FieldBinding {
    /// The synthetic identity field. Serialized from the record identity;
    /// never deserialized.
    Identity { field: usize },

    Property {
        property: usize,
        field: usize,
        repeated: bool,
        op: FieldOp,
    },
}

///
/// FieldOp
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub(crate) enum FieldOp {
    Blob,
    Bool,
    Enum,
    Float,
    Int,
    Nested { schema: String },
    Text,
    Timestamp,
}

impl FieldOp {
    pub(crate) const fn expects(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Bool => "boolean",
            Self::Enum => "enum",
            Self::Float => "float",
            Self::Int => "integer",
            Self::Nested { .. } => "nested record",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        }
    }
}

impl FieldBinding {
    pub(crate) const fn identity(field: usize) -> Self {
        Self::Identity { field }
    }

    pub(crate) const fn property(property: usize, field: usize, repeated: bool, op: FieldOp) -> Self {
        Self::Property {
            property,
            field,
            repeated,
            op,
        }
    }

    /// Apply the entity-to-message direction for this field.
    pub(crate) fn serialize(
        &self,
        registry: &Registry,
        record: &Record,
        message: &mut Message,
    ) -> Result<(), ConvertError> {
        match self {
            Self::Identity { field } => {
                let wire = record.id().map_or(MessageValue::Null, MessageValue::Uint64);
                message.set_slot(*field, wire);
                Ok(())
            }
            Self::Property {
                property,
                field,
                repeated,
                op,
            } => {
                let schema = message.schema().clone();
                let name = schema.fields()[*field].name.as_str();
                let value = record.slot(*property);

                let wire = if *repeated {
                    match value {
                        Value::List(items) => MessageValue::List(
                            items
                                .iter()
                                .map(|item| serialize_one(registry, op, name, item))
                                .collect::<Result<_, _>>()?,
                        ),
                        Value::Null => MessageValue::List(Vec::new()),
                        other => {
                            return Err(ConvertError::ValueKindMismatch {
                                field: name.to_string(),
                                expected: "list",
                                found: other.kind_name().to_string(),
                            });
                        }
                    }
                } else {
                    serialize_one(registry, op, name, value)?
                };

                message.set_slot(*field, wire);
                Ok(())
            }
        }
    }

    /// Apply the message-to-entity direction for this field.
    pub(crate) fn deserialize(
        &self,
        registry: &Registry,
        message: &Message,
        record: &mut Record,
    ) -> Result<(), ConvertError> {
        match self {
            // identity is assigned at record-creation time, not via message
            Self::Identity { .. } => Ok(()),
            Self::Property {
                property,
                field,
                repeated,
                op,
            } => {
                let name = message.schema().fields()[*field].name.as_str();
                let wire = message.slot(*field);

                let value = if *repeated {
                    match wire {
                        MessageValue::List(items) => Value::List(
                            items
                                .iter()
                                .map(|item| deserialize_one(registry, op, name, item))
                                .collect::<Result<_, _>>()?,
                        ),
                        MessageValue::Null => Value::List(Vec::new()),
                        other => {
                            return Err(ConvertError::ValueKindMismatch {
                                field: name.to_string(),
                                expected: "list",
                                found: other.kind_name().to_string(),
                            });
                        }
                    }
                } else {
                    deserialize_one(registry, op, name, wire)?
                };

                record.set_slot(*property, value);
                Ok(())
            }
        }
    }
}

fn serialize_one(
    registry: &Registry,
    op: &FieldOp,
    field: &str,
    value: &Value,
) -> Result<MessageValue, ConvertError> {
    match (op, value) {
        // Timestamps floor to whole seconds before the wire multiply;
        // sub-second precision is truncated. Null maps to zero on the wire.
        (FieldOp::Timestamp, Value::Null) => Ok(MessageValue::Uint64(0)),
        (FieldOp::Timestamp, Value::Timestamp(ts)) => {
            Ok(MessageValue::Uint64(ts.as_secs().saturating_mul(1_000)))
        }

        (_, Value::Null) => Ok(MessageValue::Null),

        (FieldOp::Int, Value::Int(v)) => Ok(MessageValue::Int64(*v)),
        (FieldOp::Float, Value::Float(v)) => Ok(MessageValue::Double(*v)),
        (FieldOp::Bool, Value::Bool(v)) => Ok(MessageValue::Bool(*v)),
        (FieldOp::Text, Value::Text(v)) => Ok(MessageValue::String(v.clone())),
        (FieldOp::Blob, Value::Blob(v)) => Ok(MessageValue::Bytes(v.clone())),
        (FieldOp::Enum, Value::Enum(v)) => Ok(MessageValue::Enum(v.clone())),

        (FieldOp::Nested { schema }, Value::Record(nested)) => registry
            .serialize_named(nested, schema)
            .map(|m| MessageValue::Message(Box::new(m))),

        (op, value) => Err(ConvertError::ValueKindMismatch {
            field: field.to_string(),
            expected: op.expects(),
            found: value.kind_name().to_string(),
        }),
    }
}

fn deserialize_one(
    registry: &Registry,
    op: &FieldOp,
    field: &str,
    wire: &MessageValue,
) -> Result<Value, ConvertError> {
    match (op, wire) {
        // Zero and absent both read back as null; the wire value is whole
        // milliseconds, reconstructed from whole seconds.
        (FieldOp::Timestamp, MessageValue::Uint64(0) | MessageValue::Null) => Ok(Value::Null),
        (FieldOp::Timestamp, MessageValue::Uint64(ms)) => {
            Ok(Value::Timestamp(Timestamp::from_seconds(ms / 1_000)))
        }

        (_, MessageValue::Null) => Ok(Value::Null),

        (FieldOp::Int, MessageValue::Int64(v)) => Ok(Value::Int(*v)),
        (FieldOp::Float, MessageValue::Double(v)) => Ok(Value::Float(*v)),
        (FieldOp::Bool, MessageValue::Bool(v)) => Ok(Value::Bool(*v)),
        (FieldOp::Text, MessageValue::String(v)) => Ok(Value::Text(v.clone())),
        (FieldOp::Blob, MessageValue::Bytes(v)) => Ok(Value::Blob(v.clone())),
        (FieldOp::Enum, MessageValue::Enum(v)) => Ok(Value::Enum(v.clone())),

        (FieldOp::Nested { .. }, MessageValue::Message(nested)) => registry
            .message_to_entity(nested, None)
            .map(|r| Value::Record(Box::new(r))),

        (op, wire) => Err(ConvertError::ValueKindMismatch {
            field: field.to_string(),
            expected: op.expects(),
            found: wire.kind_name().to_string(),
        }),
    }
}
