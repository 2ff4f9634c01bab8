//! Core error types for callguard-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! the failure modes of the host type registry.

use crate::type_id::TypeId;
use thiserror::Error;

/// Core errors produced by the callguard-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Attempting to register a type name that already exists in the registry.
    #[error("duplicate type name: '{name}'")]
    DuplicateTypeName { name: String },

    /// A TypeId was not found in the type registry.
    #[error("type not found: TypeId({id})", id = id.0)]
    TypeNotFound { id: TypeId },

    /// The requested base type does not allow subclassing.
    #[error("type '{name}' is not an acceptable base type")]
    FinalBase { name: String },
}
