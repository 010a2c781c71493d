use crate::schema::types::options::{DefineOptions, GeneratorSpec};
use crate::schema::types::schema::{Constraint, FieldShape, MapShape, SchemaShape};
use crate::schema::types::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A complete schema definition as it appears in a JSON document.
///
/// Any unknown top-level field causes a deserialization error so that stale
/// attributes do not silently pass through the system. The `options` payload
/// is parsed separately by [`parse_options`] so that key presence stays
/// observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonSchemaDefinition {
    pub name: String,
    pub shape: JsonShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// The serde-expressible subset of [`SchemaShape`].
///
/// Primitive shapes serialize as bare strings (`"int"`), composite shapes as
/// single-key objects (`{"seq": "int"}`). `pattern` is the one expressible
/// constraint and implies a string base shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonShape {
    Bool,
    Int,
    Float,
    Str,
    Enum(Vec<Value>),
    Optional(Box<JsonShape>),
    Seq(Box<JsonShape>),
    Map(JsonMapShape),
    Ref(String),
    Pattern(String),
    Opaque(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonMapShape {
    #[serde(default)]
    pub fields: BTreeMap<String, JsonFieldShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Box<JsonShape>>,
}

/// A field is either a bare shape (required by default) or a detailed entry
/// with an explicit `required` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonFieldShape {
    Bare(JsonShape),
    Detailed {
        shape: JsonShape,
        #[serde(default = "default_required")]
        required: bool,
    },
}

fn default_required() -> bool {
    true
}

impl TryFrom<JsonShape> for SchemaShape {
    type Error = SchemaError;

    fn try_from(shape: JsonShape) -> Result<Self, SchemaError> {
        Ok(match shape {
            JsonShape::Bool => SchemaShape::Bool,
            JsonShape::Int => SchemaShape::Int,
            JsonShape::Float => SchemaShape::Float,
            JsonShape::Str => SchemaShape::Str,
            JsonShape::Enum(values) => SchemaShape::Enum(values),
            JsonShape::Optional(inner) => {
                SchemaShape::Optional(Box::new(SchemaShape::try_from(*inner)?))
            }
            JsonShape::Seq(inner) => SchemaShape::Seq(Box::new(SchemaShape::try_from(*inner)?)),
            JsonShape::Map(map) => {
                let mut fields = BTreeMap::new();
                for (name, field) in map.fields {
                    let (shape, required) = match field {
                        JsonFieldShape::Bare(shape) => (SchemaShape::try_from(shape)?, true),
                        JsonFieldShape::Detailed { shape, required } => {
                            (SchemaShape::try_from(shape)?, required)
                        }
                    };
                    fields.insert(name, FieldShape { shape, required });
                }
                let extra = match map.extra {
                    Some(inner) => Some(Box::new(SchemaShape::try_from(*inner)?)),
                    None => None,
                };
                SchemaShape::Map(MapShape { fields, extra })
            }
            JsonShape::Ref(name) => SchemaShape::Ref(name),
            JsonShape::Pattern(pattern) => {
                SchemaShape::constrained(SchemaShape::Str, Constraint::pattern(&pattern)?)
            }
            JsonShape::Opaque(tag) => SchemaShape::Opaque(tag),
        })
    }
}

/// Option keys exactly as supplied in a serialized payload.
///
/// No defaulting happens here: an absent key stays `None`, and a present
/// `"example": null` key becomes `Some(Value::Null)`. Defaults are applied
/// only when converting into [`DefineOptions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonOptions {
    pub docs: Option<String>,
    pub example: Option<Value>,
    pub generator: Option<Value>,
    pub make_builders: Option<bool>,
}

/// Parses an option payload, rejecting anything that is not a JSON object,
/// any unrecognized key, and any wrong-typed value.
pub fn parse_options(value: &Value) -> Result<JsonOptions, SchemaError> {
    let map = value.as_object().ok_or_else(|| {
        SchemaError::InvalidOptions(format!(
            "options must be a JSON object, got {}",
            json_type_name(value)
        ))
    })?;

    let mut options = JsonOptions::default();
    for (key, entry) in map {
        match key.as_str() {
            "docs" => {
                let docs = entry.as_str().ok_or_else(|| {
                    SchemaError::InvalidOptions(format!(
                        "'docs' must be a string, got {}",
                        json_type_name(entry)
                    ))
                })?;
                options.docs = Some(docs.to_string());
            }
            "example" => {
                options.example = Some(entry.clone());
            }
            "generator" => {
                options.generator = Some(entry.clone());
            }
            "make_builders" => {
                let flag = entry.as_bool().ok_or_else(|| {
                    SchemaError::InvalidOptions(format!(
                        "'make_builders' must be a boolean, got {}",
                        json_type_name(entry)
                    ))
                })?;
                options.make_builders = Some(flag);
            }
            other => {
                return Err(SchemaError::InvalidOptions(format!(
                    "unrecognized option key '{other}'"
                )));
            }
        }
    }
    Ok(options)
}

impl JsonOptions {
    /// Applies defaults and converts into the typed option set.
    ///
    /// A `generator` key fails here: a serialized document can never carry a
    /// generator instance or a transform function.
    pub fn into_define_options(self, schema: &str) -> Result<DefineOptions, SchemaError> {
        if let Some(generator) = self.generator {
            return Err(SchemaError::InvalidGeneratorOption {
                schema: schema.to_string(),
                found: json_type_name(&generator).to_string(),
            });
        }
        Ok(DefineOptions {
            docs: self.docs.unwrap_or_default(),
            generator: GeneratorSpec::Default,
            example: self.example,
            make_builders: self.make_builders.unwrap_or(true),
        })
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
