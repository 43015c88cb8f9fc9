use std::{any::type_name, fmt::Debug};

use crate::{
    config::ResolveMode,
    errors::{RequireError, ResolveError},
    factories::{DynFactory, IntoFactory},
    initiator::DiInitiator,
    record::{FieldBinder, Record},
    resolver::Resolver,
    types::Instance,
};

/// A registered unit - an existing value or a factory
pub enum Item {
    Value(Instance),
    Factory(Box<dyn DynFactory>),
}
impl Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Value(instance) => f.debug_tuple("Value").field(&instance.info.type_name).finish(),
            Item::Factory(factory) => f.debug_tuple("Factory").field(&factory.name()).finish(),
        }
    }
}

impl Item {
    pub fn value<R: Resolver>(value: R) -> Self {
        Item::Value(Instance::new(value))
    }

    pub fn factory<Marker, F: IntoFactory<Marker>>(factory: F) -> Self {
        Item::Factory(Box::new(factory.into_factory()))
    }

    pub fn as_value(&self) -> Option<&Instance> {
        match self {
            Item::Value(instance) => Some(instance),
            Item::Factory(_) => None,
        }
    }

    pub fn as_factory(&self) -> Option<&dyn DynFactory> {
        match self {
            Item::Value(_) => None,
            Item::Factory(factory) => Some(factory.as_ref()),
        }
    }
}

/// Pool of values and factories
///
/// The pool is used in cycles:
/// 1. Register values and factories
/// 2. [`Pool::resolve`] invokes every factory once and replaces the pool contents by the resulting values
/// 3. Query values with [`Pool::get_one`], [`Pool::get`], [`Pool::require`] - or register more and resolve again
///
/// The pool is meant to be owned by a single initialization sequence, it has no internal synchronization.
#[derive(Default)]
pub struct Pool {
    items: Vec<Item>,
}
impl Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

// Registration
impl Pool {
    pub fn new() -> Self {
        Pool { items: Vec::new() }
    }

    pub fn register(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn register_all(&mut self, items: impl IntoIterator<Item = Item>) -> &mut Self {
        self.items.extend(items);
        self
    }

    pub fn add_instance<R: Resolver>(&mut self, instance: R) -> &mut Self {
        self.register(Item::value(instance))
    }

    pub fn add_factory<Marker, F: IntoFactory<Marker>>(&mut self, factory: F) -> &mut Self {
        self.register(Item::factory(factory))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All values currently in the pool, in pool order
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.items.iter().filter_map(Item::as_value)
    }
}

// Resolution
impl Pool {
    /// Invokes every registered factory exactly once and replaces the pool by the resulting values
    ///
    /// On error the pool is left as it was.
    pub fn resolve(&mut self, mode: ResolveMode) -> Result<(), ResolveError> {
        let resolved = DiInitiator::initiate(&mut self.items, mode)?;
        self.items = resolved.into_iter().map(Item::Value).collect();
        Ok(())
    }
}

// Accessors
impl Pool {
    /// First value of type `R`, in pool order
    pub fn find<R: Resolver>(&self) -> Option<R> {
        let info = R::type_info();
        self.instances()
            .find(|instance| instance.is(&info))
            .and_then(|instance| instance.downcast().ok())
    }

    /// Like [`Pool::find`], but reports what is missing
    pub fn require<R: Resolver>(&self) -> Result<R, RequireError> {
        let info = R::type_info();
        match self.instances().find(|instance| instance.is(&info)) {
            Some(instance) => {
                instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<R>(),
                        actual_type,
                    })
            }
            None => Err(RequireError::TypeMissing(type_name::<R>())),
        }
    }

    /// Fills `slot` with the first value of its type
    ///
    /// The slot stays unchanged if there is none - that is not an error.
    /// Returns whether the slot was filled.
    pub fn get_one<R: Resolver>(&self, slot: &mut R) -> bool {
        match self.find::<R>() {
            Some(found) => {
                *slot = found;
                true
            }
            None => false,
        }
    }

    /// Fills every field the record exposes, independently
    ///
    /// Returns the number of filled fields.
    pub fn get<Rec: Record + ?Sized>(&self, record: &mut Rec) -> usize {
        let mut binder = FieldBinder::new(self);
        record.bind_fields(&mut binder);
        binder.filled()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::resolver::dep::Dep;

    #[derive(Debug, PartialEq)]
    struct Leaf {
        content: String,
    }

    fn new_leaf() -> Dep<Leaf> {
        Dep::new(Leaf {
            content: "x".into(),
        })
    }

    #[test]
    fn registration_appends_in_order() {
        let mut pool = Pool::new();
        pool.add_factory(new_leaf)
            .add_instance(Arc::new(1_u8))
            .register_all([Item::value(Arc::new(2_u16)), Item::factory(new_leaf)]);

        assert_eq!(pool.len(), 4);
        assert!(pool.items()[0].as_factory().is_some());
        assert!(pool.items()[1].as_value().is_some());
        assert!(pool.items()[3].as_factory().is_some());
        assert_eq!(pool.instances().count(), 2);
    }

    #[test]
    fn get_one_on_empty_pool_leaves_slot() {
        let pool = Pool::new();
        let mut slot = Arc::new(String::from("untouched"));

        assert!(!pool.get_one(&mut slot));
        assert_eq!(*slot, "untouched");
    }

    #[test]
    fn get_one_takes_first_registered() {
        let mut pool = Pool::new();
        pool.add_instance(Arc::new(String::from("first")))
            .add_instance(Arc::new(String::from("second")));

        let mut slot = Arc::new(String::new());
        assert!(pool.get_one(&mut slot));
        assert_eq!(*slot, "first");
    }

    #[test]
    fn get_one_shares_reference_values() {
        let mut pool = Pool::new();
        let leaf = new_leaf();
        pool.add_instance(leaf.clone());

        let mut slot = Dep::new(Leaf {
            content: String::new(),
        });
        assert!(pool.get_one(&mut slot));
        slot.write().content = "changed".into();

        assert_eq!(leaf.read().content, "changed");
    }

    #[test]
    fn factories_are_not_values() {
        let mut pool = Pool::new();
        pool.add_factory(new_leaf);

        assert!(pool.find::<Dep<Leaf>>().is_none());
        assert!(matches!(
            pool.require::<Dep<Leaf>>(),
            Err(RequireError::TypeMissing(_))
        ));
    }

    #[test]
    fn resolve_replaces_factories_with_values() {
        let mut pool = Pool::new();
        pool.add_factory(new_leaf);

        pool.resolve(ResolveMode::Safe).unwrap();

        assert_eq!(pool.len(), 1);
        assert!(pool.items()[0].as_factory().is_none());
        assert_eq!(pool.require::<Dep<Leaf>>().unwrap().read().content, "x");
    }

    #[test]
    fn debug_lists_items() {
        let mut pool = Pool::new();
        pool.add_factory(new_leaf).add_instance(Arc::new(1_u8));

        let printed = format!("{pool:?}");
        assert!(printed.contains("Factory"));
        assert!(printed.contains("Value"));
    }
}
