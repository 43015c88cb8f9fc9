use crate::{pool::Pool, resolver::Resolver};

/// A struct whose fields can be filled from a [`Pool`]
///
/// Usually implemented with [`impl_record!`](crate::impl_record).
/// Only the fields handed to the binder are ever touched.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use wrapp_inject::{impl_record, Dep, Pool};
///
/// struct Settings { port: u16 }
///
/// struct Services {
///     settings: Option<Arc<Settings>>,
///     counter: Dep<u32>,
/// }
/// impl_record!(Services { counter } optional { settings });
///
/// let mut pool = Pool::new();
/// pool.add_instance(Arc::new(Settings { port: 8080 }));
///
/// let mut services = Services { settings: None, counter: Dep::new(0) };
/// assert_eq!(pool.get(&mut services), 1);
/// assert_eq!(services.settings.unwrap().port, 8080);
/// ```
pub trait Record {
    /// Hands every injectable field to the binder
    fn bind_fields(&mut self, fields: &mut FieldBinder<'_>);
}

/// Fills record fields from a pool, one at a time
pub struct FieldBinder<'p> {
    pool: &'p Pool,
    filled: usize,
}
impl<'p> FieldBinder<'p> {
    pub(crate) fn new(pool: &'p Pool) -> Self {
        FieldBinder { pool, filled: 0 }
    }

    /// Replaces the field if the pool has a value of its type
    pub fn field<R: Resolver>(&mut self, field: &mut R) -> &mut Self {
        if self.pool.get_one(field) {
            self.filled += 1;
        }
        self
    }

    /// Sets the field to `Some` if the pool has a value of its type
    pub fn optional<R: Resolver>(&mut self, field: &mut Option<R>) -> &mut Self {
        if let Some(found) = self.pool.find::<R>() {
            *field = Some(found);
            self.filled += 1;
        }
        self
    }

    pub fn filled(&self) -> usize {
        self.filled
    }
}

/// Implements [`Record`] for a struct
///
/// List the fields to fill, `Option` fields go into the `optional` block.
/// Fields not listed are never touched.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),* $(,)? } $(optional { $($optional:ident),* $(,)? })?) => {
        impl $crate::Record for $ty {
            fn bind_fields(&mut self, fields: &mut $crate::FieldBinder<'_>) {
                $( fields.field(&mut self.$field); )*
                $($( fields.optional(&mut self.$optional); )*)?
            }
        }
    };
}
