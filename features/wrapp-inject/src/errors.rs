use std::sync::Arc;

use thiserror::Error;

use crate::types::{DynError, TypeInfo};

/// Errors raised while a factory reads its arguments
#[derive(Error, Debug)]
pub enum InjectError {
    /// Could not require the type
    #[error(transparent)]
    RequireError(#[from] RequireError),
    /// Generic error during Injection
    #[error("Error during injection: {0}")]
    Other(DynError),
}

/// Errors when trying to require a certain type
#[derive(Error, Debug, Clone)]
pub enum RequireError {
    /// The required type is not known
    #[error("The required type '{0}' is not known.")]
    TypeMissing(&'static str),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Two or more factories supply the same type
#[derive(Error, Debug, Clone)]
#[error("conflict detected: multiple factories supply '{duplicate}'")]
pub struct ConflictError {
    pub duplicate: TypeInfo,
}

/// Dependencies which could not be satisfied
#[derive(Error, Debug, Clone)]
pub struct MissingDependencyError {
    /// Missing types, in the order they were found
    pub missing: Vec<TypeInfo>,
}
impl std::fmt::Display for MissingDependencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.missing.iter().map(|info| info.type_name).collect();
        write!(f, "resolution failed, missing dependencies: {}", names.join(", "))
    }
}
impl MissingDependencyError {
    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.missing.contains(info)
    }
}

/// Errors while resolving a pool
///
/// A pool is left untouched whenever one of these is returned
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// Factories supply the same type - detected before any factory runs
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Some inputs have no value
    #[error(transparent)]
    MissingDependencies(#[from] MissingDependencyError),

    /// A Factory failed to build
    #[error("Factory '{factory}' failed - error: {error}")]
    FactoryFailed {
        factory: &'static str,
        error: Arc<DynError>,
    },
}

/// Errors of the process wide default pool
#[derive(Error, Debug, Clone)]
pub enum GlobalError {
    #[error("The default pool is not initialized")]
    NotInitialized,
    #[error("The default pool is already initialized")]
    AlreadyInitialized,
}

/// A resolve mode could not be parsed
#[derive(Error, Debug, Clone)]
#[error("Unknown resolve mode '{0}', expected 'safe' or 'tolerant'")]
pub struct ParseModeError(pub String);
