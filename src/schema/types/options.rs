use crate::generator::Generator;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A post-processing step applied to every sample of a derived generator.
pub type TransformFn = dyn Fn(Value) -> Value + Send + Sync;

/// How the generator for a schema is obtained at definition time.
///
/// Resolved by the caller at the call site; there is no runtime inspection
/// of the supplied value.
#[derive(Clone)]
pub enum GeneratorSpec {
    /// Derive a structural default from the shape
    Default,
    /// Use the supplied generator verbatim, never deriving a default
    Replace(Generator),
    /// Derive the structural default, then post-process every sample
    Transform(Arc<TransformFn>),
}

impl fmt::Debug for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorSpec::Default => write!(f, "GeneratorSpec::Default"),
            GeneratorSpec::Replace(_) => write!(f, "GeneratorSpec::Replace(..)"),
            GeneratorSpec::Transform(_) => write!(f, "GeneratorSpec::Transform(..)"),
        }
    }
}

/// Options accepted by schema definition.
///
/// `example` preserves the presence-vs-value distinction: `None` means "no
/// example given, sample one from the resolved generator", while
/// `Some(Value::Null)` means "the example is literally null".
#[derive(Debug, Clone)]
pub struct DefineOptions {
    /// Description recorded in the schema's documentation metadata
    pub docs: String,
    /// Generator customization
    pub generator: GeneratorSpec,
    /// Representative example; sampled from the generator when absent
    pub example: Option<Value>,
    /// Whether to expose builder operations for field-keyed shapes
    pub make_builders: bool,
}

impl Default for DefineOptions {
    fn default() -> Self {
        Self {
            docs: String::new(),
            generator: GeneratorSpec::Default,
            example: None,
            make_builders: true,
        }
    }
}

impl DefineOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the documentation description.
    pub fn with_docs(mut self, docs: &str) -> Self {
        self.docs = docs.to_string();
        self
    }

    /// Replaces the structural default generator entirely.
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = GeneratorSpec::Replace(generator);
        self
    }

    /// Post-processes every sample of the structural default generator.
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.generator = GeneratorSpec::Transform(Arc::new(transform));
        self
    }

    /// Supplies the example verbatim. Passing `Value::Null` records a null
    /// example rather than requesting a sampled one.
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Disables builder emission even for field-keyed shapes.
    pub fn without_builders(mut self) -> Self {
        self.make_builders = false;
        self
    }
}
