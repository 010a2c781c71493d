// Internal modules
pub mod core;
pub mod types;
pub mod validator;

// Public re-exports
pub use self::core::SchemaCore;
pub use types::{errors::SchemaError, schema::Schema};
pub use validator::SchemaValidator;
