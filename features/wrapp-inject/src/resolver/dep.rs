use std::{
    any::type_name,
    fmt::Debug,
    sync::{Arc, OnceLock},
};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    resolver::Resolver,
    types::{DependencyInfo, Injectable, Instance, Placeholder, TypeInfo},
};

/// Shared, mutable dependency
///
/// All clones of a `Dep` point to the same cell. A cell is either bound to a value,
/// or unbound while it stands in for a value that is not constructed yet.
///
/// Unbound cells are only handed out when the pool breaks a dependency cycle,
/// they are bound to the real value before resolution completes.
/// A factory receiving a `Dep` may store it, but should not read it while constructing.
///
/// ### Memory
///
/// Handles keep their value alive. Values referring to each other through `Dep`s form a
/// reference cycle and are never dropped, even after the pool is gone.
///
/// ### Panics
///
/// [`Dep::read`] and [`Dep::write`] panic if the cell is unbound.
/// Outside of a running resolution this can only happen for handles obtained from a failed resolution.
pub struct Dep<T>(Arc<DepCell<T>>);

struct DepCell<T> {
    storage: OnceLock<Arc<RwLock<T>>>,
}

impl<T> Clone for Dep<T> {
    fn clone(&self) -> Self {
        Dep(self.0.clone())
    }
}
impl<T> Debug for Dep<T> {
    // Only the state is printed - contents may point back to this Dep
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_bound() { "bound" } else { "unbound" };
        f.debug_tuple("Dep")
            .field(&type_name::<T>())
            .field(&state)
            .finish()
    }
}

impl<T> Dep<T> {
    /// True once the dependency points to a value
    pub fn is_bound(&self) -> bool {
        self.0.storage.get().is_some()
    }

    /// Whether both handles observe the same value
    pub fn ptr_eq(&self, other: &Dep<T>) -> bool {
        match (self.0.storage.get(), other.0.storage.get()) {
            (Some(this), Some(other)) => Arc::ptr_eq(this, other),
            _ => Arc::ptr_eq(&self.0, &other.0),
        }
    }
}

impl<T: Injectable> Dep<T> {
    /// Creates a bound dependency
    pub fn new(value: T) -> Self {
        Dep(Arc::new(DepCell {
            storage: OnceLock::from(Arc::new(RwLock::new(value))),
        }))
    }

    pub(crate) fn unbound() -> Self {
        Dep(Arc::new(DepCell {
            storage: OnceLock::new(),
        }))
    }

    /// Read access to the value
    ///
    /// # Panics
    /// - When the dependency is unbound
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.try_read()
            .expect("Dep accessed before it was bound - was it read while constructing?")
    }

    /// Write access to the value, visible to every holder of this dependency
    ///
    /// # Panics
    /// - When the dependency is unbound
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.try_write()
            .expect("Dep accessed before it was bound - was it written while constructing?")
    }

    pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
        self.0.storage.get().map(|storage| storage.read())
    }

    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
        self.0.storage.get().map(|storage| storage.write())
    }

    /// Binds this cell to the storage of `real`
    ///
    /// Returns false if `real` is unbound itself, or this cell already points elsewhere.
    pub(crate) fn bind(&self, real: &Dep<T>) -> bool {
        let Some(storage) = real.0.storage.get() else {
            return false;
        };

        match self.0.storage.set(storage.clone()) {
            Ok(()) => true,
            Err(_) => self.ptr_eq(real),
        }
    }
}

impl<T: Injectable> Resolver for Dep<T> {
    fn dependency_info() -> DependencyInfo {
        DependencyInfo {
            type_info: TypeInfo::of::<Dep<T>>(),
            placeholder: Some(placeholder::<T>),
        }
    }
}

fn placeholder<T: Injectable>() -> Placeholder {
    Placeholder {
        instance: Instance::new(Dep::<T>::unbound()),
        bind: bind_erased::<T>,
    }
}

fn bind_erased<T: Injectable>(placeholder: &Instance, real: &Instance) -> bool {
    match (
        placeholder.downcast_ref::<Dep<T>>(),
        real.downcast_ref::<Dep<T>>(),
    ) {
        (Some(placeholder), Some(real)) => placeholder.bind(real),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        content: String,
    }

    #[test]
    fn clones_share_the_value() {
        let leaf = Dep::new(Leaf {
            content: "x".into(),
        });
        let other = leaf.clone();

        other.write().content = "y".into();

        assert_eq!(leaf.read().content, "y");
        assert!(leaf.ptr_eq(&other));
    }

    #[test]
    fn unbound_cell_has_no_value() {
        let leaf = Dep::<Leaf>::unbound();
        assert!(!leaf.is_bound());
        assert!(leaf.try_read().is_none());
        assert!(leaf.try_write().is_none());
    }

    #[test]
    #[should_panic(expected = "before it was bound")]
    fn reading_unbound_cell_panics() {
        let leaf = Dep::<Leaf>::unbound();
        let _ = leaf.read();
    }

    #[test]
    fn binding_shares_storage_in_place() {
        let stub = Dep::<Leaf>::unbound();
        let held_by_someone = stub.clone();
        let real = Dep::new(Leaf {
            content: "real".into(),
        });

        assert!(stub.bind(&real));

        assert_eq!(held_by_someone.read().content, "real");
        real.write().content = "changed".into();
        assert_eq!(held_by_someone.read().content, "changed");
        assert!(held_by_someone.ptr_eq(&real));
    }

    #[test]
    fn binding_to_an_unbound_cell_fails() {
        let stub = Dep::<Leaf>::unbound();
        let other = Dep::<Leaf>::unbound();
        assert!(!stub.bind(&other));
        assert!(!stub.is_bound());
    }

    #[test]
    fn rebinding_to_a_different_value_fails() {
        let first = Dep::new(Leaf { content: "a".into() });
        let second = Dep::new(Leaf { content: "b".into() });
        assert!(!first.bind(&second));
        assert!(first.bind(&first.clone()));
        assert_eq!(first.read().content, "a");
    }

    #[test]
    fn erased_placeholder_binds_through_instances() {
        let info = Dep::<Leaf>::dependency_info();
        let make = info.placeholder.expect("Dep is a reference type");
        let stub = make();
        assert_eq!(stub.info(), info.type_info);

        let real = Instance::new(Dep::new(Leaf {
            content: "real".into(),
        }));
        assert!(stub.bind_to(&real));

        let bound = stub
            .instance
            .downcast::<Dep<Leaf>>()
            .expect("placeholder holds a Dep<Leaf>");
        assert_eq!(bound.read().content, "real");
    }

    #[test]
    fn erased_placeholder_rejects_other_types() {
        let stub = placeholder::<Leaf>();
        let other = Instance::new(Dep::new(String::from("nope")));
        assert!(!stub.bind_to(&other));
    }

    #[test]
    fn debug_does_not_recurse_into_contents() {
        struct Cyclic {
            _me: Option<Dep<Cyclic>>,
        }
        let dep = Dep::new(Cyclic { _me: None });
        dep.write()._me = Some(dep.clone());

        let printed = format!("{:?}", dep);
        assert!(printed.starts_with("Dep("));
        assert!(!printed.contains("unbound"));
    }
}
