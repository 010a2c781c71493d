//! Incremental, validation-deferred construction of schema instances.
//!
//! A builder accumulates fields one at a time with value semantics and only
//! validates at [`build`](InstanceBuilder::build) time, against the full
//! declared shape of its schema. The builder type itself is the
//! "incomplete" marker: until `build` succeeds there is no value.

use crate::schema::core::SchemaCore;
use crate::schema::types::schema::Schema;
use crate::schema::types::{SchemaError, SpecimenResult};
use crate::schema::validator::SchemaValidator;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A partially constructed instance of a schema.
///
/// Obtained from [`SchemaCore::builder`] or [`SchemaCore::builder_seeded`];
/// only schemas whose structural shape is a field-keyed map expose builders.
/// Setters consume the builder and return a new one, so intermediate states
/// can be kept and branched freely.
#[derive(Clone)]
pub struct InstanceBuilder<'a> {
    core: &'a SchemaCore,
    schema: Arc<Schema>,
    fields: Map<String, Value>,
}

impl<'a> InstanceBuilder<'a> {
    pub(crate) fn new(core: &'a SchemaCore, schema: Arc<Schema>) -> Self {
        Self {
            core,
            schema,
            fields: Map::new(),
        }
    }

    pub(crate) fn seeded(core: &'a SchemaCore, schema: Arc<Schema>, seed: Map<String, Value>) -> Self {
        Self {
            core,
            schema,
            fields: seed,
        }
    }

    /// The schema this builder constructs instances of.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Sets a named field, returning the updated builder.
    ///
    /// Only the schema's specific (named) keys are settable; wildcard keys
    /// have no fixed name and are rejected here. Extra keys may still enter
    /// through a seed mapping and are checked at build time.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> SpecimenResult<Self> {
        let known = self
            .schema
            .builder_fields()
            .map_or(false, |fields| fields.iter().any(|name| name == field));
        if !known {
            return Err(SchemaError::InvalidField(format!(
                "schema '{}' has no builder field '{field}'",
                self.schema.name
            )));
        }
        self.fields.insert(field.to_string(), value.into());
        Ok(self)
    }

    /// Finalizes the instance: validates the accumulated fields against the
    /// full declared shape and returns the value on success. Validation
    /// diagnostics propagate untouched.
    pub fn build(self) -> SpecimenResult<Value> {
        let value = Value::Object(self.fields);
        SchemaValidator::new(self.core).validate(&self.schema.name, &self.schema.shape, &value)?;
        Ok(value)
    }

    /// Threading convenience: applies `set` over the pairs in order, then
    /// finalizes.
    pub fn assemble<I, K, V>(self, pairs: I) -> SpecimenResult<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut builder = self;
        for (field, value) in pairs {
            builder = builder.set(field.as_ref(), value)?;
        }
        builder.build()
    }
}

impl fmt::Debug for InstanceBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceBuilder")
            .field("schema", &self.schema.name)
            .field("fields", &self.fields)
            .finish()
    }
}
