use crate::{
    derive::{DeriveOptions, FieldBinding, derive_schema},
    entity::Record,
    error::{ConvertError, DeriveError},
    message::Message,
};
use std::{collections::BTreeMap, sync::Arc};
use wiremap_schema::node::{MessageSchema, ModelClass};

///
/// Registry
///
/// Maps model classes to their registered message schemas and each schema to
/// its converter set. Written during initialization, read-only afterward;
/// `seal` makes the freeze explicit. Registration is atomic: derivation runs
/// to completion before anything is committed.
///

#[derive(Debug, Default)]
pub struct Registry {
    schemas: BTreeMap<String, Registered>,
    by_model: BTreeMap<String, Vec<String>>,
    sealed: bool,
}

///
/// Registered
///

#[derive(Debug)]
struct Registered {
    model: Arc<ModelClass>,
    schema: Arc<MessageSchema>,
    bindings: Vec<FieldBinding>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// REGISTRATION
    ///

    /// Derive a new message schema named `<ModelClassName>Message` and
    /// register it.
    pub fn attach(
        &mut self,
        model: &Arc<ModelClass>,
        options: DeriveOptions,
    ) -> Result<Arc<MessageSchema>, DeriveError> {
        let name = format!("{}Message", model.name());
        self.attach_named(model, options, name)
    }

    /// Derive a new message schema under an explicit name and register it.
    pub fn attach_named(
        &mut self,
        model: &Arc<ModelClass>,
        options: DeriveOptions,
        name: impl Into<String>,
    ) -> Result<Arc<MessageSchema>, DeriveError> {
        self.register(name.into(), model, &options)
    }

    /// Derive fields for a pre-declared schema shell and register the result.
    ///
    /// Derived fields replace whatever the shell declared.
    pub fn populate(
        &mut self,
        shell: MessageSchema,
        model: &Arc<ModelClass>,
        options: DeriveOptions,
    ) -> Result<Arc<MessageSchema>, DeriveError> {
        self.register(shell.name().to_string(), model, &options)
    }

    fn register(
        &mut self,
        name: String,
        model: &Arc<ModelClass>,
        options: &DeriveOptions,
    ) -> Result<Arc<MessageSchema>, DeriveError> {
        if self.sealed {
            return Err(DeriveError::Sealed);
        }
        if self.schemas.contains_key(&name) {
            return Err(DeriveError::DuplicateSchemaName { name });
        }

        let derived = derive_schema(self, &name, model, options)?;
        let schema = Arc::new(derived.schema);

        self.schemas.insert(
            name.clone(),
            Registered {
                model: model.clone(),
                schema: schema.clone(),
                bindings: derived.bindings,
            },
        );
        self.by_model
            .entry(model.name().to_string())
            .or_default()
            .push(name);

        Ok(schema)
    }

    /// Freeze the registry; every subsequent registration fails.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    ///
    /// LOOKUP
    ///

    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&Arc<MessageSchema>> {
        self.schemas.get(name).map(|r| &r.schema)
    }

    /// Names of every schema registered for a model class, in registration
    /// order.
    #[must_use]
    pub fn schema_names_for(&self, model_name: &str) -> &[String] {
        self.by_model.get(model_name).map_or(&[], Vec::as_slice)
    }

    ///
    /// CONVERSION
    ///

    /// Convert a record to a message.
    ///
    /// When `schema` is omitted it is inferred from the record's model class;
    /// inference requires exactly one registered schema.
    pub fn entity_to_message(
        &self,
        record: &Record,
        schema: Option<&str>,
    ) -> Result<Message, ConvertError> {
        let name = match schema {
            Some(name) => name.to_string(),
            None => {
                let model = record.model().name();
                match self.schema_names_for(model) {
                    [] => {
                        return Err(ConvertError::NoSchemaRegistered {
                            model: model.to_string(),
                        });
                    }
                    [sole] => sole.clone(),
                    names => {
                        return Err(ConvertError::AmbiguousSchema {
                            model: model.to_string(),
                            count: names.len(),
                        });
                    }
                }
            }
        };

        self.serialize_named(record, &name)
    }

    /// Convert a message back to a record; the schema is determined by the
    /// message's own type. Reuses `existing` when supplied, enabling partial
    /// update in place. Identity is never assigned from a message.
    pub fn message_to_entity(
        &self,
        message: &Message,
        existing: Option<Record>,
    ) -> Result<Record, ConvertError> {
        let registered = self
            .schemas
            .get(message.schema_name())
            .filter(|r| *r.schema == *message.schema().as_ref())
            .ok_or_else(|| ConvertError::NoConverterRegistered {
                schema: message.schema_name().to_string(),
            })?;

        let mut record = match existing {
            Some(record) => {
                if record.model().as_ref() != registered.model.as_ref() {
                    return Err(ConvertError::SchemaMismatch {
                        schema: registered.schema.name().to_string(),
                        expected: registered.model.name().to_string(),
                        found: record.model().name().to_string(),
                    });
                }
                record
            }
            None => Record::new(&registered.model),
        };

        for binding in &registered.bindings {
            binding.deserialize(self, message, &mut record)?;
        }

        Ok(record)
    }

    pub(crate) fn serialize_named(
        &self,
        record: &Record,
        schema_name: &str,
    ) -> Result<Message, ConvertError> {
        let registered =
            self.schemas
                .get(schema_name)
                .ok_or_else(|| ConvertError::NoConverterRegistered {
                    schema: schema_name.to_string(),
                })?;

        if record.model().as_ref() != registered.model.as_ref() {
            return Err(ConvertError::SchemaMismatch {
                schema: schema_name.to_string(),
                expected: registered.model.name().to_string(),
                found: record.model().name().to_string(),
            });
        }

        let mut message = Message::new(&registered.schema);
        for binding in &registered.bindings {
            binding.serialize(self, record, &mut message)?;
        }

        Ok(message)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::DeriveError, test_fixtures::person_model};

    #[test]
    fn test_attach_uses_default_name() {
        let mut registry = Registry::new();
        let person = person_model();

        let schema = registry.attach(&person, DeriveOptions::default()).unwrap();
        assert_eq!(schema.name(), "PersonMessage");
        assert!(registry.schema("PersonMessage").is_some());
        assert_eq!(registry.schema_names_for("Person"), ["PersonMessage"]);
    }

    #[test]
    fn test_populate_registers_under_shell_name() {
        let mut registry = Registry::new();
        let person = person_model();

        let shell = MessageSchema::shell("PersonView");
        let schema = registry
            .populate(shell, &person, DeriveOptions::default())
            .unwrap();

        assert_eq!(schema.name(), "PersonView");
        assert_eq!(
            schema.field_count(),
            person.properties().len(),
            "populate derives one field per property"
        );
    }

    #[test]
    fn test_duplicate_schema_name_rejected() {
        let mut registry = Registry::new();
        let person = person_model();

        registry.attach(&person, DeriveOptions::default()).unwrap();
        let err = registry
            .attach(&person, DeriveOptions::default())
            .unwrap_err();

        assert!(matches!(err, DeriveError::DuplicateSchemaName { name } if name == "PersonMessage"));
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let mut registry = Registry::new();
        let person = person_model();

        registry.seal();
        assert!(registry.is_sealed());

        let err = registry
            .attach(&person, DeriveOptions::default())
            .unwrap_err();
        assert!(matches!(err, DeriveError::Sealed));
    }

    #[test]
    fn test_failed_registration_commits_nothing() {
        let mut registry = Registry::new();
        let person = person_model();

        // second registration under a fresh name but with a bogus nested
        // override would fail -- simulate with an over-long schema name
        let long_name = "X".repeat(100);
        let err = registry
            .attach_named(&person, DeriveOptions::default(), long_name)
            .unwrap_err();
        assert!(matches!(err, DeriveError::Name(_)));

        assert!(registry.schema_names_for("Person").is_empty());
    }
}
