use crate::types::{DependencyInfo, TypeInfo};

pub mod arc;
pub mod dep;

/// A handle type that can be registered, produced by factories and injected into them
///
/// Implemented by [`dep::Dep`] (shared mutable cell, may be stubbed to break cycles)
/// and by [`std::sync::Arc`] (immutable shared value, never stubbed).
pub trait Resolver: Clone + Send + Sync + 'static {
    fn dependency_info() -> DependencyInfo;

    /// The identity used to match this handle against other items
    fn type_info() -> TypeInfo {
        Self::dependency_info().type_info
    }
}
