use crate::schema::core::SchemaCore;
use crate::schema::types::json_schema::json_type_name;
use crate::schema::types::schema::{MapShape, SchemaShape};
use crate::schema::types::{SchemaError, SpecimenResult};
use serde_json::Value;

/// Validates candidate values against a schema's shape.
///
/// The validator walks the shape and value together, collecting path-tagged
/// diagnostics. `Ref` shapes resolve through the owning [`SchemaCore`]'s
/// catalog, so composite schemas validate nested values end to end.
pub struct SchemaValidator<'a> {
    core: &'a SchemaCore,
}

impl<'a> SchemaValidator<'a> {
    /// Create a new validator operating on the provided [`SchemaCore`].
    pub fn new(core: &'a SchemaCore) -> Self {
        Self { core }
    }

    /// Validate `value` against `shape`, reporting every issue found.
    pub fn validate(
        &self,
        schema_name: &str,
        shape: &SchemaShape,
        value: &Value,
    ) -> SpecimenResult<()> {
        let mut issues = Vec::new();
        self.walk(shape, value, "$", &mut issues)?;
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Validation {
                schema: schema_name.to_string(),
                issues,
            })
        }
    }

    fn walk(
        &self,
        shape: &SchemaShape,
        value: &Value,
        path: &str,
        issues: &mut Vec<String>,
    ) -> SpecimenResult<()> {
        match shape {
            SchemaShape::Bool => {
                if !value.is_boolean() {
                    issues.push(mismatch(path, "boolean", value));
                }
            }
            SchemaShape::Int => {
                if value.as_i64().is_none() && value.as_u64().is_none() {
                    issues.push(mismatch(path, "integer", value));
                }
            }
            SchemaShape::Float => {
                if !value.is_number() {
                    issues.push(mismatch(path, "number", value));
                }
            }
            SchemaShape::Str => {
                if !value.is_string() {
                    issues.push(mismatch(path, "string", value));
                }
            }
            SchemaShape::Enum(values) => {
                if !values.contains(value) {
                    issues.push(format!("{path}: value is not one of the allowed alternatives"));
                }
            }
            SchemaShape::Optional(inner) => {
                if !value.is_null() {
                    self.walk(inner, value, path, issues)?;
                }
            }
            SchemaShape::Seq(inner) => match value.as_array() {
                Some(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = format!("{path}[{index}]");
                        self.walk(inner, item, &item_path, issues)?;
                    }
                }
                None => issues.push(mismatch(path, "array", value)),
            },
            SchemaShape::Map(map) => self.walk_map(map, value, path, issues)?,
            SchemaShape::Ref(name) => match self.core.get_schema(name)? {
                Some(schema) => self.walk(&schema.shape, value, path, issues)?,
                None => issues.push(format!("{path}: references unknown schema '{name}'")),
            },
            SchemaShape::Constrained(constrained) => {
                let before = issues.len();
                self.walk(&constrained.inner, value, path, issues)?;
                if issues.len() == before && !constrained.constraint.check(value) {
                    issues.push(format!(
                        "{path}: failed constraint '{}'",
                        constrained.constraint.label()
                    ));
                }
            }
            // no structural shape to check against
            SchemaShape::Opaque(_) => {}
        }
        Ok(())
    }

    fn walk_map(
        &self,
        map: &MapShape,
        value: &Value,
        path: &str,
        issues: &mut Vec<String>,
    ) -> SpecimenResult<()> {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                issues.push(mismatch(path, "object", value));
                return Ok(());
            }
        };

        for (name, field) in &map.fields {
            match object.get(name) {
                Some(entry) => {
                    let field_path = format!("{path}.{name}");
                    self.walk(&field.shape, entry, &field_path, issues)?;
                }
                None => {
                    if field.required {
                        issues.push(format!("{path}.{name}: missing required field"));
                    }
                }
            }
        }

        for (key, entry) in object {
            if map.fields.contains_key(key) {
                continue;
            }
            match &map.extra {
                Some(extra_shape) => {
                    let field_path = format!("{path}.{key}");
                    self.walk(extra_shape, entry, &field_path, issues)?;
                }
                None => issues.push(format!("{path}.{key}: unexpected field")),
            }
        }
        Ok(())
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> String {
    format!("{path}: expected {expected}, got {}", json_type_name(value))
}
