use crate::schema::core::SchemaCore;
use crate::schema::types::{JsonSchemaDefinition, Schema, SpecimenResult};
use log::info;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Loads a schema definition from a JSON file and defines it on the core.
///
/// The file holds one serialized definition: a name, a shape, and
/// optionally an option payload. The committed schema is returned so
/// callers can read its metadata directly.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the content is not a valid
/// definition document, or the definition itself fails (bad options, bad
/// shape, example validation).
pub fn load_definition_from_file<P: AsRef<Path>>(
    path: P,
    core: &SchemaCore,
) -> SpecimenResult<Arc<Schema>> {
    let path = path.as_ref();
    info!("Loading schema definition from {}", path.display());
    let raw = fs::read_to_string(path)?;
    let definition: JsonSchemaDefinition = serde_json::from_str(&raw)?;
    core.define_from_json(definition)
}
