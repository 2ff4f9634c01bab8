pub mod types;
pub mod type_id;
pub mod value;
pub mod specifier;
pub mod signature;
pub mod error;

// Re-export commonly used types
pub use types::TypeDef;
pub use type_id::{TypeId, TypeRegistry};
pub use value::Value;
pub use specifier::{Specifier, SpecifierDecl};
pub use signature::{CallArgs, CaptureMode, Signature};
pub use error::CoreError;
