pub mod engine;
pub mod registry;
pub mod sampler;

pub use engine::derive_generator;
pub use registry::{GeneratorRegistry, Primitive, SchemaIdentity};
pub use sampler::{GenConfig, Generator};
