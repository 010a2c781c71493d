//! # Specimen
//!
//! Schema definitions that carry derived mock-data generators, incremental
//! builders, and documentation metadata.
//!
//! ## Core Components
//!
//! * `schema` - Shape model, structural validation, and the definition core
//! * `generator` - Generator type, structural derivation engine, and the
//!   identity-keyed generator registry
//! * `builder` - Incremental, validation-deferred instance construction
//! * `loader` - Loading serialized definitions from JSON files
//!
//! ## Architecture
//!
//! Everything hangs off a [`SchemaCore`]: an explicit, shareable context
//! holding the catalog of committed schemas and the generator registry.
//! Defining a schema resolves its generator (structural default, full
//! replacement, or a transform over the default), produces a representative
//! example, validates that example against the declared shape, attaches the
//! `(description, example)` documentation pair, and registers the generator
//! so later schemas that reference this one generate end to end for free.
//!
//! ```
//! use serde_json::json;
//! use specimen::{DefineOptions, MapShape, SchemaCore, SchemaIdentity, SchemaShape};
//!
//! fn main() -> Result<(), specimen::SchemaError> {
//!     let core = SchemaCore::new();
//!     let shape = SchemaShape::Map(
//!         MapShape::new()
//!             .field("name", SchemaShape::Str)
//!             .field("age", SchemaShape::Int),
//!     );
//!     core.define("user", shape, DefineOptions::new().with_docs("A user"))?;
//!
//!     let mock = core.generate(&SchemaIdentity::named("user"))?;
//!     assert!(mock.get("name").is_some());
//!
//!     let user = core
//!         .builder("user")?
//!         .set("name", "Bob")?
//!         .set("age", 42)?
//!         .build()?;
//!     assert_eq!(user, json!({"name": "Bob", "age": 42}));
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod generator;
pub mod loader;
pub mod schema;

// Re-export main types for convenience
pub use builder::InstanceBuilder;
pub use generator::{derive_generator, GenConfig, Generator, GeneratorRegistry, Primitive, SchemaIdentity};
pub use loader::load_definition_from_file;
pub use schema::types::{
    parse_options, Constraint, ConstrainedShape, DefineOptions, DocMetadata, FieldShape,
    GeneratorSpec, JsonFieldShape, JsonMapShape, JsonOptions, JsonSchemaDefinition, JsonShape,
    MapShape, Schema, SchemaError, SchemaShape, SpecimenResult,
};
pub use schema::{SchemaCore, SchemaValidator};
