use crate::generator::registry::SchemaIdentity;
use thiserror::Error;

/// Errors produced while defining schemas, deriving generators, or building
/// instances.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A schema name was looked up but never defined
    #[error("schema not found: {0}")]
    NotFound(String),

    /// A field name or schema name is malformed or unknown
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// A shape declaration is unusable (empty enum, bad pattern, ...)
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A serialized option payload is malformed or carries unknown keys
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A serialized definition supplied a `generator` option, which can
    /// never name a real generator or transform
    #[error("invalid generator option for schema '{schema}': a serialized definition cannot carry a generator (found {found})")]
    InvalidGeneratorOption { schema: String, found: String },

    /// A value failed structural validation against a schema
    #[error("schema '{schema}' failed validation: {}", .issues.join("; "))]
    Validation { schema: String, issues: Vec<String> },

    /// No generator is registered for the identity and none can be derived
    /// from a structural shape
    #[error("no generator registered or derivable for {0}")]
    UnresolvedSchema(SchemaIdentity),

    /// A constrained generator ran out of retries without producing a
    /// satisfying sample
    #[error("generator exhausted: {0}")]
    GeneratorExhausted(String),

    /// The schema exists but exposes no builder operations
    #[error("schema '{0}' does not expose builders")]
    NoBuilders(String),

    /// Internal faults such as a poisoned lock
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// IO errors from the definition loader
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(error: serde_json::Error) -> Self {
        SchemaError::Serialization(error.to_string())
    }
}

/// Result type alias for operations that can fail with a [`SchemaError`]
pub type SpecimenResult<T> = Result<T, SchemaError>;
