pub mod errors;
pub mod json_schema;
pub mod options;
pub mod schema;

pub use errors::{SchemaError, SpecimenResult};
pub use json_schema::{parse_options, JsonFieldShape, JsonMapShape, JsonOptions, JsonSchemaDefinition, JsonShape};
pub use options::{DefineOptions, GeneratorSpec};
pub use schema::{Constraint, ConstrainedShape, DocMetadata, FieldShape, MapShape, Schema, SchemaShape};
