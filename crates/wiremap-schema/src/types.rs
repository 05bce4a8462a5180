use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Cardinality
///

#[derive(
    Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

impl Cardinality {
    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::Many)
    }

    /// Wire label for this cardinality.
    ///
    /// `Many` subsumes requiredness; a repeated property is never `Required`.
    #[must_use]
    pub const fn label(self) -> Label {
        match self {
            Self::One => Label::Required,
            Self::Opt => Label::Optional,
            Self::Many => Label::Repeated,
        }
    }
}

///
/// Label
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Label {
    Optional,
    Repeated,
    Required,
}

///
/// Variant
/// wire-level value kind of a derived field
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Variant {
    Bool,
    Bytes,
    Double,
    Enum,
    Int64,
    Message,
    String,
    Uint64,
}

impl Variant {
    /// Enum and message fields carry the referenced type name as metadata.
    #[must_use]
    pub const fn requires_type_name(self) -> bool {
        matches!(self, Self::Enum | Self::Message)
    }
}

///
/// FieldNaming
///

#[derive(
    Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum FieldNaming {
    #[default]
    AsIs,
    CamelCase,
}

impl FieldNaming {
    /// Derive the wire field name from a property name.
    ///
    /// `CamelCase` splits on underscores and capitalizes every segment after
    /// the first; the first segment is kept verbatim. Empty interior segments
    /// render as `_`.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::AsIs => name.to_string(),
            Self::CamelCase => camel_case(name),
        }
    }
}

fn camel_case(name: &str) -> String {
    let mut segments = name.split('_');
    let Some(first) = segments.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(name.len());
    out.push_str(first);
    for segment in segments {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) => {
                out.extend(c.to_uppercase());
                out.push_str(chars.as_str());
            }
            None => out.push('_'),
        }
    }

    out
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_cardinality() {
        assert_eq!(Cardinality::One.label(), Label::Required);
        assert_eq!(Cardinality::Opt.label(), Label::Optional);
        assert_eq!(Cardinality::Many.label(), Label::Repeated);
    }

    #[test]
    fn test_camel_case_basic() {
        assert_eq!(FieldNaming::CamelCase.apply("first_name"), "firstName");
        assert_eq!(FieldNaming::CamelCase.apply("id"), "id");
        assert_eq!(FieldNaming::CamelCase.apply("created_at_ms"), "createdAtMs");
    }

    #[test]
    fn test_camel_case_keeps_first_segment_verbatim() {
        assert_eq!(FieldNaming::CamelCase.apply("API_key"), "APIKey");
    }

    #[test]
    fn test_camel_case_empty_segments() {
        assert_eq!(FieldNaming::CamelCase.apply("a__b"), "a_B");
        assert_eq!(FieldNaming::CamelCase.apply("a_"), "a_");
    }

    #[test]
    fn test_as_is_is_identity() {
        assert_eq!(FieldNaming::AsIs.apply("first_name"), "first_name");
    }

    #[test]
    fn test_type_name_requirement() {
        assert!(Variant::Enum.requires_type_name());
        assert!(Variant::Message.requires_type_name());
        assert!(!Variant::Int64.requires_type_name());
        assert!(!Variant::Uint64.requires_type_name());
    }
}
