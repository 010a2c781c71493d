use crate::generator::sampler::Generator;
use crate::schema::types::{SchemaError, SpecimenResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// A JSON primitive kind, usable as a registry key to override how every
/// leaf of that kind is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Bool,
    Int,
    Float,
    Str,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Str => "str",
        };
        write!(f, "{name}")
    }
}

/// Stable identifier for a schema, used as the generator registry key.
///
/// Two schemas the catalog considers the same map to the same identity; the
/// registry holds at most one generator per identity (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaIdentity {
    /// A defined named schema, or the tag of an opaque external type
    Named(String),
    /// A structural primitive kind
    Primitive(Primitive),
}

impl SchemaIdentity {
    pub fn named(name: &str) -> Self {
        SchemaIdentity::Named(name.to_string())
    }
}

impl fmt::Display for SchemaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIdentity::Named(name) => write!(f, "schema '{name}'"),
            SchemaIdentity::Primitive(p) => write!(f, "primitive '{p}'"),
        }
    }
}

/// Mapping from schema identity to its resolved generator.
///
/// An explicit context object: created empty, mutated only by [`set`]
/// (upsert) and [`reset`] (test support), read on every derivation and
/// every generate call. The single mutex gives per-key atomicity and
/// read-your-writes visibility; there are no multi-key transactions.
///
/// [`set`]: GeneratorRegistry::set
/// [`reset`]: GeneratorRegistry::reset
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    entries: Mutex<HashMap<SchemaIdentity, Generator>>,
}

impl GeneratorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure lookup; absence is a normal outcome. Returns a clone of the
    /// registered generator as a read-only handle.
    pub fn get(&self, identity: &SchemaIdentity) -> SpecimenResult<Option<Generator>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire registry lock".to_string()))?;
        Ok(entries.get(identity).cloned())
    }

    /// Unconditional upsert, visible to subsequent lookups immediately.
    /// No compatibility validation happens here; the definition flow
    /// validates by sampling and checking the result against the schema.
    pub fn set(&self, identity: SchemaIdentity, generator: Generator) -> SpecimenResult<()> {
        debug!("Registering generator for {identity}");
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire registry lock".to_string()))?;
        entries.insert(identity, generator);
        Ok(())
    }

    pub fn contains(&self, identity: &SchemaIdentity) -> SpecimenResult<bool> {
        Ok(self.get(identity)?.is_some())
    }

    pub fn len(&self) -> SpecimenResult<usize> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire registry lock".to_string()))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> SpecimenResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Clears every entry. Individual entries are never deleted; tests use
    /// this wholesale reset to return to a clean state.
    pub fn reset(&self) -> SpecimenResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SchemaError::InvalidData("Failed to acquire registry lock".to_string()))?;
        entries.clear();
        Ok(())
    }
}
