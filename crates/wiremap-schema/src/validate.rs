use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// NameError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NameError {
    #[error("{what} name must not be empty")]
    Empty { what: &'static str },

    #[error("{what} name '{name}' exceeds {max} characters")]
    TooLong {
        what: &'static str,
        name: String,
        max: usize,
    },

    #[error("duplicate {what} name '{name}'")]
    Duplicate { what: &'static str, name: String },
}

/// Check a single schema or field identifier against the length caps.
pub fn validate_ident(what: &'static str, name: &str, max: usize) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty { what });
    }
    if name.len() > max {
        return Err(NameError::TooLong {
            what,
            name: name.to_string(),
            max,
        });
    }

    Ok(())
}

/// Reject duplicate identifiers within one namespace.
pub fn validate_unique<'a, I>(what: &'static str, names: I) -> Result<(), NameError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(NameError::Duplicate {
                what,
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_FIELD_NAME_LEN;

    #[test]
    fn test_empty_ident_rejected() {
        let err = validate_ident("field", "", MAX_FIELD_NAME_LEN).unwrap_err();
        assert_eq!(err, NameError::Empty { what: "field" });
    }

    #[test]
    fn test_long_ident_rejected() {
        let name = "x".repeat(MAX_FIELD_NAME_LEN + 1);
        let err = validate_ident("field", &name, MAX_FIELD_NAME_LEN).unwrap_err();
        assert!(matches!(err, NameError::TooLong { max, .. } if max == MAX_FIELD_NAME_LEN));
    }

    #[test]
    fn test_ident_at_cap_accepted() {
        let name = "x".repeat(MAX_FIELD_NAME_LEN);
        assert!(validate_ident("field", &name, MAX_FIELD_NAME_LEN).is_ok());
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = validate_unique("field", ["a", "b", "a"]).unwrap_err();
        assert_eq!(
            err,
            NameError::Duplicate {
                what: "field",
                name: "a".to_string()
            }
        );

        assert!(validate_unique("field", ["a", "b", "c"]).is_ok());
    }
}
