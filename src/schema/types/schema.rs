use crate::schema::types::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Declarative description of a value's valid shape.
///
/// A shape is the structural half of a schema: it says what kind of JSON
/// value conforms, field by field, without carrying a name or metadata.
/// Shapes nest freely; `Ref` points at a previously defined named schema so
/// composite schemas pick up nested validation and generation without any
/// extra wiring.
#[derive(Debug, Clone)]
pub enum SchemaShape {
    /// A JSON boolean
    Bool,
    /// A JSON integer
    Int,
    /// Any JSON number
    Float,
    /// A JSON string
    Str,
    /// Exactly one of a fixed set of values
    Enum(Vec<Value>),
    /// The inner shape, or null
    Optional(Box<SchemaShape>),
    /// An array whose elements all conform to the inner shape
    Seq(Box<SchemaShape>),
    /// An object with named fields and optionally arbitrary extra keys
    Map(MapShape),
    /// A reference to a previously defined named schema
    Ref(String),
    /// An inner shape narrowed by a labelled predicate
    Constrained(ConstrainedShape),
    /// An external type with no structural shape; validation accepts any
    /// value, generation requires a registered generator under its tag
    Opaque(String),
}

impl SchemaShape {
    /// Strips any constraint wrappers, possibly nested, and returns the
    /// underlying structural shape. Used for builder field enumeration;
    /// validation always runs against the full constrained shape.
    pub fn unwrap_constraints(&self) -> &SchemaShape {
        let mut current = self;
        while let SchemaShape::Constrained(constrained) = current {
            current = &constrained.inner;
        }
        current
    }

    /// Convenience constructor for a constrained shape.
    pub fn constrained(inner: SchemaShape, constraint: Constraint) -> Self {
        SchemaShape::Constrained(ConstrainedShape {
            inner: Box::new(inner),
            constraint,
        })
    }
}

/// Object shape: named fields plus an optional wildcard for extra keys.
#[derive(Debug, Clone, Default)]
pub struct MapShape {
    /// Named fields with their shapes; these are the specific keys that
    /// builder setters are generated for
    pub fields: BTreeMap<String, FieldShape>,
    /// Shape for arbitrary additional string keys; `None` means extra keys
    /// are rejected
    pub extra: Option<Box<SchemaShape>>,
}

impl MapShape {
    /// Creates an empty map shape with no fields and no wildcard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required named field.
    pub fn field(mut self, name: &str, shape: SchemaShape) -> Self {
        self.fields
            .insert(name.to_string(), FieldShape { shape, required: true });
        self
    }

    /// Adds an optional named field (the key may be absent).
    pub fn optional_field(mut self, name: &str, shape: SchemaShape) -> Self {
        self.fields
            .insert(name.to_string(), FieldShape { shape, required: false });
        self
    }

    /// Allows arbitrary extra string keys conforming to the given shape.
    pub fn with_extra(mut self, shape: SchemaShape) -> Self {
        self.extra = Some(Box::new(shape));
        self
    }

    /// The specific (named, non-wildcard) keys of this shape, in sorted
    /// order.
    pub fn specific_keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

/// A named field inside a [`MapShape`].
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub shape: SchemaShape,
    /// Whether the key must be present
    pub required: bool,
}

/// An inner shape narrowed by a predicate.
#[derive(Debug, Clone)]
pub struct ConstrainedShape {
    pub inner: Box<SchemaShape>,
    pub constraint: Constraint,
}

type CheckFn = dyn Fn(&Value) -> bool + Send + Sync;

/// A labelled predicate over candidate values.
///
/// The label appears in validation diagnostics and generator exhaustion
/// errors; the predicate itself is opaque.
#[derive(Clone)]
pub struct Constraint {
    label: String,
    check: Arc<CheckFn>,
}

impl Constraint {
    /// Creates a constraint from a label and a predicate.
    pub fn new<F>(label: &str, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.to_string(),
            check: Arc::new(check),
        }
    }

    /// Creates a regex constraint over string values. Non-strings fail the
    /// constraint.
    pub fn pattern(pattern: &str) -> Result<Self, SchemaError> {
        let regex = regex::Regex::new(pattern)
            .map_err(|e| SchemaError::InvalidShape(format!("bad pattern '{pattern}': {e}")))?;
        Ok(Self {
            label: format!("matches /{pattern}/"),
            check: Arc::new(move |value: &Value| {
                value.as_str().map_or(false, |s| regex.is_match(s))
            }),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("label", &self.label)
            .finish()
    }
}

/// Documentation metadata attached to a committed schema: the description
/// paired with a representative example value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMetadata {
    /// Human-readable description; empty string when none was supplied
    pub description: String,
    /// Representative value, always valid against the schema
    pub example: Value,
}

/// A committed, metadata-bearing schema.
///
/// Produced only by [`SchemaCore::define`](crate::schema::SchemaCore::define)
/// after the example validated; immutable afterwards. Redefining the same
/// name replaces the catalog entry with a fresh instance.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Unique name identifying this schema
    pub name: String,
    /// The full declared shape, constraint wrappers intact
    pub shape: SchemaShape,
    /// Description and example for documentation tooling
    pub metadata: DocMetadata,
    pub(crate) builder_fields: Option<Vec<String>>,
}

impl Schema {
    /// The field names builder setters accept, or `None` when this schema
    /// exposes no builders (non-map shape, or builders disabled at
    /// definition time). Wildcard keys never appear here.
    pub fn builder_fields(&self) -> Option<&[String]> {
        self.builder_fields.as_deref()
    }
}
