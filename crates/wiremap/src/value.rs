use crate::{entity::Record, types::Timestamp};
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Model-side value universe: one variant per mapped property kind, plus
/// `List` for many-cardinality transport and `Null` for unset slots.
/// List order is preserved through conversion.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum Value {
    Blob(#[serde(with = "serde_bytes")] Vec<u8>),
    Bool(bool),
    Enum(ValueEnum),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Record(Box<Record>),
    Text(String),
    Timestamp(Timestamp),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    #[must_use]
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::List` from a list literal.
    ///
    /// Intended for tests and inline construction.
    #[must_use]
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stable lowercase tag used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Blob(_) => "blob",
            Self::Bool(_) => "boolean",
            Self::Enum(_) => "enum",
            Self::Float(_) => "float",
            Self::Int(_) => "integer",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Record(_) => "record",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
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
    pub fn as_record(&self) -> Option<&Record> {
        if let Self::Record(r) = self {
            Some(r)
        } else {
            None
        }
    }
}

macro_rules! impl_value_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool       => Bool,
    f32        => Float,
    f64        => Float,
    i8         => Int,
    i16        => Int,
    i32        => Int,
    i64        => Int,
    u8         => Int,
    u16        => Int,
    u32        => Int,
    &str       => Text,
    String     => Text,
    Timestamp  => Timestamp,
    ValueEnum  => Enum,
    Vec<u8>    => Blob,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(Box::new(record))
    }
}

///
/// ValueEnum
/// an enum value by variant name; `path` pins the referenced enum type
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValueEnum {
    pub variant: String,
    pub path: Option<String>,
}

impl ValueEnum {
    #[must_use]
    pub fn new(variant: &str, path: Option<&str>) -> Self {
        Self {
            variant: variant.to_string(),
            path: path.map(ToString::to_string),
        }
    }

    /// Build an enum value that ignores the path for loose matching.
    #[must_use]
    pub fn loose(variant: &str) -> Self {
        Self::new(variant, None)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(7_i32), Value::Int(7));
        assert_eq!(Value::from(2.5_f32), Value::Float(2.5));
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(Value::from(vec![1_u8, 2]), Value::Blob(vec![1, 2]));
        assert_eq!(
            Value::from(Timestamp::from_seconds(3)),
            Value::Timestamp(Timestamp::from_millis(3_000))
        );
    }

    #[test]
    fn test_from_list() {
        let v = Value::from_list(vec!["a", "b"]);
        assert_eq!(
            v.as_list().unwrap(),
            &[Value::Text("a".into()), Value::Text("b".into())]
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::Int(1).kind_name(), "integer");
        assert_eq!(Value::from_list(Vec::<i64>::new()).kind_name(), "list");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Text("hi".into()).as_text(), Some("hi"));
        assert!(Value::Int(1).as_text().is_none());
        assert!(Value::Null.is_null());
    }
}
