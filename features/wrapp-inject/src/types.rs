use std::{
    any::{Any, TypeId},
    fmt::Debug,
    sync::Arc,
};

use crate::resolver::Resolver;

/// Error type factories may fail with
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything stored in the pool may be handed to other threads once resolution is done,
/// so it needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// A type-erased value living in the pool
///
/// The erased value is always the declared handle type (`Dep<T>` or `Arc<T>`),
/// so cloning an instance never copies the underlying content.
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    value: Arc<dyn Any + Send + Sync + 'static>,
}
impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.info.type_name).finish()
    }
}

impl Instance {
    pub(crate) fn new<R: Resolver>(value: R) -> Self {
        Instance {
            info: TypeInfo::of::<R>(),
            value: Arc::new(value),
        }
    }

    /// Clones the handle out of the instance
    ///
    /// Returns the actual type name if the instance holds something else
    pub fn downcast<R: Resolver>(&self) -> Result<R, &'static str> {
        self.downcast_ref::<R>().cloned().ok_or(self.info.type_name)
    }

    pub(crate) fn downcast_ref<R: Resolver>(&self) -> Option<&R> {
        (*self.value).downcast_ref::<R>()
    }

    /// Whether the instance satisfies a dependency on `info`
    pub fn is(&self, info: &TypeInfo) -> bool {
        self.info == *info
    }
}

/// Information about a Factory dependency
#[derive(Clone, Copy)]
pub struct DependencyInfo {
    /// The required Type
    pub type_info: TypeInfo,
    /// Creates an unbound stand-in for the type
    ///
    /// `None` for types without reference semantics, those can never be stubbed.
    pub placeholder: Option<fn() -> Placeholder>,
}
impl Debug for DependencyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyInfo")
            .field("type_info", &self.type_info)
            .field("reference", &self.is_reference())
            .finish()
    }
}
impl DependencyInfo {
    pub fn is_reference(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// Stand-in instance for a dependency which has not been produced yet
///
/// Created while breaking dependency cycles. Once the real value exists the
/// placeholder is bound to it in place, so every handle given out earlier observes the real value.
pub struct Placeholder {
    pub(crate) instance: Instance,
    /// Binds the placeholder (first) to the storage of the real value (second)
    ///
    /// Returns false if the real value can't be bound to
    pub(crate) bind: fn(&Instance, &Instance) -> bool,
}
impl Placeholder {
    pub fn info(&self) -> TypeInfo {
        self.instance.info
    }

    pub(crate) fn bind_to(&self, real: &Instance) -> bool {
        (self.bind)(&self.instance, real)
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}
