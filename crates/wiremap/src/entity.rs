use crate::{error::ConvertError, message::Message, registry::Registry, value::Value};
use serde::Serialize;
use std::sync::Arc;
use wiremap_schema::node::ModelClass;

///
/// Record
///
/// A model-class instance. Values are stored positionally, one slot per
/// property in the model's enumeration order; conversion resolves slots by
/// index, never by name. Fresh singular slots hold `Null`, repeated slots an
/// empty list.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip)]
    model: Arc<ModelClass>,

    /// Primary-key identifier; set at record-creation time, never via message.
    id: Option<u64>,

    values: Vec<Value>,
}

impl Record {
    #[must_use]
    pub fn new(model: &Arc<ModelClass>) -> Self {
        let values = model
            .properties()
            .iter()
            .map(|p| {
                if p.cardinality.is_many() {
                    Value::List(Vec::new())
                } else {
                    Value::Null
                }
            })
            .collect();

        Self {
            model: model.clone(),
            id: None,
            values,
        }
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<ModelClass> {
        &self.model
    }

    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    ///
    /// ACCESS
    ///

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.model.properties().index_of(name)?;
        self.values.get(index)
    }

    /// Assign a property by name; returns false if the model has no such
    /// property.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.model.properties().index_of(name) {
            Some(index) => {
                self.values[index] = value.into();
                true
            }
            None => false,
        }
    }

    // Index-based slot access for the registration-built bindings.
    // Indices are validated against the model at registration time.
    pub(crate) fn slot(&self, index: usize) -> &Value {
        &self.values[index]
    }

    pub(crate) fn set_slot(&mut self, index: usize, value: Value) {
        self.values[index] = value;
    }

    ///
    /// CONVERSION
    ///

    /// Convert via the sole schema registered for this record's model class.
    pub fn to_message(&self, registry: &Registry) -> Result<Message, ConvertError> {
        registry.entity_to_message(self, None)
    }

    /// Rebuild a record from a message, optionally updating `existing` in
    /// place.
    pub fn from_message(
        registry: &Registry,
        message: &Message,
        existing: Option<Self>,
    ) -> Result<Self, ConvertError> {
        registry.message_to_entity(message, existing)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use wiremap_schema::node::{ModelClass, Property, PropertyKind};

    fn model() -> Arc<ModelClass> {
        Arc::new(ModelClass::new(
            "Sample",
            vec![
                Property::new("name", PropertyKind::Text),
                Property::many("tags", PropertyKind::Text),
            ],
        ))
    }

    #[test]
    fn test_fresh_slots() {
        let record = Record::new(&model());

        assert_eq!(record.get("name"), Some(&Value::Null));
        assert_eq!(record.get("tags"), Some(&Value::List(Vec::new())));
        assert!(record.get("missing").is_none());
        assert!(record.id().is_none());
    }

    #[test]
    fn test_set_by_name() {
        let mut record = Record::new(&model());

        assert!(record.set("name", "Ada"));
        assert!(!record.set("missing", "x"));
        assert_eq!(record.get("name").unwrap().as_text(), Some("Ada"));
    }

    #[test]
    fn test_identity() {
        let record = Record::new(&model()).with_id(42);
        assert_eq!(record.id(), Some(42));
    }
}
