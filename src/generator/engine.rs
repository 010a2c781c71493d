use crate::generator::registry::{GeneratorRegistry, Primitive, SchemaIdentity};
use crate::generator::sampler::{builtin_leaf, Generator};
use crate::schema::types::schema::SchemaShape;
use crate::schema::types::{SchemaError, SpecimenResult};
use rand::Rng;
use serde_json::{Map, Value};

/// Derives the structural default generator for a shape.
///
/// The registry is the derivation context: `Ref` and `Opaque` shapes resolve
/// to already-registered generators, and primitive leaves consult registry
/// overrides before the built-in table. Nested resolution happens here, at
/// derivation time; the composed generator holds clones of whatever was
/// registered when it was derived.
pub fn derive_generator(
    shape: &SchemaShape,
    registry: &GeneratorRegistry,
) -> SpecimenResult<Generator> {
    match shape {
        SchemaShape::Bool => leaf(Primitive::Bool, registry),
        SchemaShape::Int => leaf(Primitive::Int, registry),
        SchemaShape::Float => leaf(Primitive::Float, registry),
        SchemaShape::Str => leaf(Primitive::Str, registry),
        SchemaShape::Enum(values) => {
            if values.is_empty() {
                return Err(SchemaError::InvalidShape(
                    "enum shape requires at least one value".to_string(),
                ));
            }
            let values = values.clone();
            Ok(Generator::new(move |rng, _| {
                Ok(values[rng.gen_range(0..values.len())].clone())
            }))
        }
        SchemaShape::Optional(inner) => {
            let inner = derive_generator(inner, registry)?;
            Ok(Generator::new(move |rng, config| {
                // roughly one null in four
                if rng.gen_range(0..4) == 0 {
                    Ok(Value::Null)
                } else {
                    inner.sample(rng, config)
                }
            }))
        }
        SchemaShape::Seq(inner) => {
            let item = derive_generator(inner, registry)?;
            Ok(Generator::new(move |rng, config| {
                let len = rng.gen_range(0..=config.max_collection_len);
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(item.sample(rng, config)?);
                }
                Ok(Value::Array(items))
            }))
        }
        SchemaShape::Map(map) => {
            let mut field_generators = Vec::with_capacity(map.fields.len());
            for (name, field) in &map.fields {
                let generator = derive_generator(&field.shape, registry)?;
                field_generators.push((name.clone(), generator, field.required));
            }
            Ok(Generator::new(move |rng, config| {
                let mut object = Map::new();
                for (name, generator, required) in &field_generators {
                    if *required || rng.gen::<bool>() {
                        object.insert(name.clone(), generator.sample(rng, config)?);
                    }
                }
                Ok(Value::Object(object))
            }))
        }
        SchemaShape::Ref(name) => {
            let identity = SchemaIdentity::named(name);
            registry
                .get(&identity)?
                .ok_or(SchemaError::UnresolvedSchema(identity))
        }
        SchemaShape::Opaque(tag) => {
            let identity = SchemaIdentity::named(tag);
            registry
                .get(&identity)?
                .ok_or(SchemaError::UnresolvedSchema(identity))
        }
        SchemaShape::Constrained(constrained) => {
            let inner = derive_generator(&constrained.inner, registry)?;
            Ok(inner.filtered(constrained.constraint.clone()))
        }
    }
}

fn leaf(primitive: Primitive, registry: &GeneratorRegistry) -> SpecimenResult<Generator> {
    Ok(registry
        .get(&SchemaIdentity::Primitive(primitive))?
        .unwrap_or_else(|| builtin_leaf(primitive)))
}
