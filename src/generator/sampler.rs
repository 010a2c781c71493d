use crate::generator::registry::Primitive;
use crate::schema::types::schema::Constraint;
use crate::schema::types::{SchemaError, SpecimenResult};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Sizing knobs for structural generation.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Upper bound on generated array lengths
    pub max_collection_len: usize,
    /// Upper bound on generated string lengths
    pub max_string_len: usize,
    /// How many samples a constrained generator may draw before giving up
    pub constraint_retries: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_collection_len: 4,
            max_string_len: 12,
            constraint_retries: 100,
        }
    }
}

type SampleFn = dyn Fn(&mut StdRng, &GenConfig) -> SpecimenResult<Value> + Send + Sync;

/// An opaque capability producing randomly sampled values.
///
/// Cloning is cheap (shared inner); registered generators hand out clones
/// as read-only handles. A generator is either terminal (draws a value
/// directly) or composed over another generator via [`map`] or
/// [`filtered`].
///
/// [`map`]: Generator::map
/// [`filtered`]: Generator::filtered
#[derive(Clone)]
pub struct Generator {
    sample: Arc<SampleFn>,
}

impl Generator {
    pub fn new<F>(sample: F) -> Self
    where
        F: Fn(&mut StdRng, &GenConfig) -> SpecimenResult<Value> + Send + Sync + 'static,
    {
        Self {
            sample: Arc::new(sample),
        }
    }

    /// A generator that always produces the same value.
    pub fn constant(value: Value) -> Self {
        Generator::new(move |_, _| Ok(value.clone()))
    }

    /// Draws one sample.
    pub fn sample(&self, rng: &mut StdRng, config: &GenConfig) -> SpecimenResult<Value> {
        (self.sample)(rng, config)
    }

    /// Post-processes every sample with the given function.
    pub fn map<F>(self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.map_shared(Arc::new(transform))
    }

    pub(crate) fn map_shared(
        self,
        transform: Arc<dyn Fn(Value) -> Value + Send + Sync>,
    ) -> Self {
        Generator::new(move |rng, config| Ok(transform(self.sample(rng, config)?)))
    }

    /// Re-draws until the constraint accepts a sample, up to the configured
    /// retry limit.
    pub fn filtered(self, constraint: Constraint) -> Self {
        Generator::new(move |rng, config| {
            for _ in 0..config.constraint_retries {
                let candidate = self.sample(rng, config)?;
                if constraint.check(&candidate) {
                    return Ok(candidate);
                }
            }
            Err(SchemaError::GeneratorExhausted(format!(
                "constraint '{}' rejected {} consecutive samples",
                constraint.label(),
                config.constraint_retries
            )))
        })
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator(..)")
    }
}

/// The built-in leaf generator for a primitive kind, used when no override
/// is registered for its identity.
pub(crate) fn builtin_leaf(primitive: Primitive) -> Generator {
    match primitive {
        Primitive::Bool => Generator::new(|rng, _| Ok(Value::Bool(rng.gen::<bool>()))),
        Primitive::Int => {
            Generator::new(|rng, _| Ok(Value::from(rng.gen_range(-1_000_000i64..=1_000_000))))
        }
        Primitive::Float => {
            Generator::new(|rng, _| Ok(Value::from(rng.gen_range(-1.0e6..1.0e6))))
        }
        Primitive::Str => Generator::new(|rng, config| {
            let len = rng.gen_range(1..=config.max_string_len.max(1));
            let s: String = (0..len).map(|_| rng.sample(Alphanumeric) as char).collect();
            Ok(Value::String(s))
        }),
    }
}
