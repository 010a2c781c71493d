use crate::builder::InstanceBuilder;
use crate::generator::engine::derive_generator;
use crate::generator::registry::{GeneratorRegistry, Primitive, SchemaIdentity};
use crate::generator::sampler::{GenConfig, Generator};
use crate::schema::types::json_schema::parse_options;
use crate::schema::types::options::GeneratorSpec;
use crate::schema::types::schema::{DocMetadata, Schema, SchemaShape};
use crate::schema::types::{
    DefineOptions, JsonOptions, JsonSchemaDefinition, SchemaError, SpecimenResult,
};
use crate::schema::validator::SchemaValidator;
use log::{debug, info};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").unwrap()
});

/// Core schema system combining the schema catalog, the generator registry,
/// and the definition flow.
///
/// `SchemaCore` is responsible for:
/// - Defining schemas: resolving generators, sampling and validating
///   examples, attaching documentation metadata
/// - Managing the catalog of committed schemas
/// - Producing mock values for any defined schema or primitive
/// - Handing out builders for incremental instance construction
///
/// It is an explicit context object rather than an ambient singleton:
/// callers create one, share it, and may [`reset`](SchemaCore::reset) it in
/// tests. All operations are safe to call from multiple threads.
pub struct SchemaCore {
    /// Committed schemas by name
    schemas: Mutex<HashMap<String, Arc<Schema>>>,
    /// Resolved generators by schema identity
    generators: GeneratorRegistry,
    config: GenConfig,
}

impl Default for SchemaCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCore {
    /// Creates an empty core with default sampling configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GenConfig::default())
    }

    /// Creates an empty core with a custom sampling configuration.
    #[must_use]
    pub fn with_config(config: GenConfig) -> Self {
        Self {
            schemas: Mutex::new(HashMap::new()),
            generators: GeneratorRegistry::new(),
            config,
        }
    }

    /// The generator registry backing this core.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.generators
    }

    /// Defines a schema: one committed, metadata-bearing [`Schema`] plus its
    /// side effects (generator registration, builder availability).
    ///
    /// The example (supplied or sampled) is validated against the full
    /// declared shape before anything becomes observable. A definition that
    /// fails its own example validation leaves no generator registered, no
    /// builder available, and no catalog entry.
    pub fn define(
        &self,
        name: &str,
        shape: SchemaShape,
        options: DefineOptions,
    ) -> SpecimenResult<Arc<Schema>> {
        if name.is_empty() {
            return Err(SchemaError::InvalidField(
                "Schema name cannot be empty".to_string(),
            ));
        }
        if !NAME_PATTERN.is_match(name) {
            return Err(SchemaError::InvalidField(format!(
                "Schema name '{name}' is not a valid identifier"
            )));
        }

        info!("Defining schema '{name}'");

        // Constraint wrappers are stripped only to enumerate builder
        // fields; validation and registration use the declared shape.
        let structural = shape.unwrap_constraints();
        let builder_fields = if options.make_builders {
            match structural {
                SchemaShape::Map(map) => Some(map.specific_keys()),
                _ => None,
            }
        } else {
            None
        };

        // The structural default is only derived when something will use
        // it; a replacement generator must work even for shapes that
        // cannot be derived (opaque external types).
        let effective = match options.generator {
            GeneratorSpec::Replace(generator) => generator,
            GeneratorSpec::Default => derive_generator(&shape, &self.generators)?,
            GeneratorSpec::Transform(transform) => {
                derive_generator(&shape, &self.generators)?.map_shared(transform)
            }
        };

        // Presence of the option governs, not its content: an explicitly
        // null example stays null.
        let example = match options.example {
            Some(example) => example,
            None => {
                let mut rng = StdRng::from_entropy();
                effective.sample(&mut rng, &self.config)?
            }
        };

        let schema = Arc::new(Schema {
            name: name.to_string(),
            shape,
            metadata: DocMetadata {
                description: options.docs,
                example,
            },
            builder_fields,
        });

        SchemaValidator::new(self).validate(&schema.name, &schema.shape, &schema.metadata.example)?;

        self.generators
            .set(SchemaIdentity::named(name), effective)?;

        let mut schemas = self
            .schemas
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire schema lock".to_string()))?;
        schemas.insert(name.to_string(), Arc::clone(&schema));
        debug!(
            "Schema '{name}' committed with {} builder fields",
            schema.builder_fields().map_or(0, |fields| fields.len())
        );
        Ok(schema)
    }

    /// Defines a schema from its serialized JSON form.
    pub fn define_from_json(&self, definition: JsonSchemaDefinition) -> SpecimenResult<Arc<Schema>> {
        let JsonSchemaDefinition { name, shape, options } = definition;
        let parsed = match options {
            Some(payload) => parse_options(&payload)?,
            None => JsonOptions::default(),
        };
        let options = parsed.into_define_options(&name)?;
        let shape = SchemaShape::try_from(shape)?;
        self.define(&name, shape, options)
    }

    /// Retrieves a committed schema by name.
    pub fn get_schema(&self, name: &str) -> SpecimenResult<Option<Arc<Schema>>> {
        let schemas = self
            .schemas
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire schema lock".to_string()))?;
        Ok(schemas.get(name).cloned())
    }

    /// Names of every committed schema, unordered.
    pub fn schema_names(&self) -> SpecimenResult<Vec<String>> {
        let schemas = self
            .schemas
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire schema lock".to_string()))?;
        Ok(schemas.keys().cloned().collect())
    }

    /// Validates a candidate value against a defined schema.
    pub fn validate(&self, name: &str, value: &Value) -> SpecimenResult<()> {
        let schema = self
            .get_schema(name)?
            .ok_or_else(|| SchemaError::NotFound(format!("schema '{name}' is not defined")))?;
        SchemaValidator::new(self).validate(&schema.name, &schema.shape, value)
    }

    /// Draws one sample for the identity: the registered generator when one
    /// exists, otherwise a generator derived on the fly from the identity's
    /// structural shape. Fails with `UnresolvedSchema` when neither exists.
    pub fn generate(&self, identity: &SchemaIdentity) -> SpecimenResult<Value> {
        let mut rng = StdRng::from_entropy();
        self.generate_with(identity, &mut rng)
    }

    /// Like [`generate`](SchemaCore::generate) but with a fixed seed, for
    /// reproducible output.
    pub fn generate_seeded(&self, identity: &SchemaIdentity, seed: u64) -> SpecimenResult<Value> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with(identity, &mut rng)
    }

    /// Sampling entry point over a caller-supplied RNG.
    pub fn generate_with(
        &self,
        identity: &SchemaIdentity,
        rng: &mut StdRng,
    ) -> SpecimenResult<Value> {
        if let Some(generator) = self.generators.get(identity)? {
            return generator.sample(rng, &self.config);
        }
        let generator = self.fallback_generator(identity)?;
        generator.sample(rng, &self.config)
    }

    fn fallback_generator(&self, identity: &SchemaIdentity) -> SpecimenResult<Generator> {
        match identity {
            SchemaIdentity::Named(name) => {
                let schema = self
                    .get_schema(name)?
                    .ok_or_else(|| SchemaError::UnresolvedSchema(identity.clone()))?;
                derive_generator(&schema.shape, &self.generators)
            }
            SchemaIdentity::Primitive(primitive) => {
                // primitives always have a structural shape
                let shape = match primitive {
                    Primitive::Bool => SchemaShape::Bool,
                    Primitive::Int => SchemaShape::Int,
                    Primitive::Float => SchemaShape::Float,
                    Primitive::Str => SchemaShape::Str,
                };
                derive_generator(&shape, &self.generators)
            }
        }
    }

    /// Starts an empty builder for a defined schema.
    ///
    /// Errors with `NotFound` for unknown names and `NoBuilders` for
    /// schemas without builder support.
    pub fn builder(&self, name: &str) -> SpecimenResult<InstanceBuilder<'_>> {
        let schema = self.builder_schema(name)?;
        Ok(InstanceBuilder::new(self, schema))
    }

    /// Starts a builder wrapping a copy of the given mapping.
    pub fn builder_seeded(
        &self,
        name: &str,
        seed: Map<String, Value>,
    ) -> SpecimenResult<InstanceBuilder<'_>> {
        let schema = self.builder_schema(name)?;
        Ok(InstanceBuilder::seeded(self, schema, seed))
    }

    fn builder_schema(&self, name: &str) -> SpecimenResult<Arc<Schema>> {
        let schema = self
            .get_schema(name)?
            .ok_or_else(|| SchemaError::NotFound(format!("schema '{name}' is not defined")))?;
        if schema.builder_fields().is_none() {
            return Err(SchemaError::NoBuilders(name.to_string()));
        }
        Ok(schema)
    }

    /// Clears the catalog and the generator registry. Test support.
    pub fn reset(&self) -> SpecimenResult<()> {
        info!("Resetting schema core");
        self.generators.reset()?;
        let mut schemas = self
            .schemas
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire schema lock".to_string()))?;
        schemas.clear();
        Ok(())
    }
}
