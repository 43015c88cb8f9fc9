//! Wrapp Inject resolves a pool of values and factories into a fully wired set of instances.
//!
//! Factories declare their inputs by type. Resolving the pool invokes every factory once,
//! in an order that satisfies those inputs, and replaces the factories by what they produced.
//! Factories depending on each other in a cycle can still be resolved: reference-typed inputs
//! ([`Dep`]) are handed out as placeholders first and bound in place once the real value exists.
//!
//! Wrapp Inject consists of the following components:
//!
//! 1. Pool - registering values and factories, resolving, and reading values back
//! 2. Resolvers - the handle types flowing through the pool: [`Dep`] and [`std::sync::Arc`]
//! 3. Factories - functions, closures or [`InstanceFactory`] implementations
//! 4. Records - filling several fields of a struct at once
//! 5. Errors - conflicts, missing dependencies and failing factories
//!
//! # Example
//!
//! ```rust
//! use wrapp_inject::{Dep, Pool, ResolveMode};
//!
//! struct Left { right: Dep<Right> }
//! struct Right { left: Dep<Left>, name: String }
//!
//! fn new_left(right: Dep<Right>) -> Dep<Left> {
//!     Dep::new(Left { right })
//! }
//!
//! fn new_right(left: Dep<Left>) -> Dep<Right> {
//!     Dep::new(Right { left, name: "right".into() })
//! }
//!
//! let mut pool = Pool::new();
//! pool.add_factory(new_left).add_factory(new_right);
//!
//! // A cycle can't be built by hand
//! assert!(pool.resolve(ResolveMode::Safe).is_err());
//!
//! pool.resolve(ResolveMode::Tolerant).unwrap();
//!
//! let left = pool.require::<Dep<Left>>().unwrap();
//! let right = pool.require::<Dep<Right>>().unwrap();
//! assert!(left.read().right.ptr_eq(&right));
//! assert!(right.read().left.ptr_eq(&left));
//! assert_eq!(left.read().right.read().name, "right");
//! ```

pub mod config;
pub mod errors;
pub mod factories;
pub mod global;
pub mod handle;
mod initiator;
pub mod pool;
pub mod record;
pub mod resolver;
pub mod types;

pub use config::ResolveMode;
pub use errors::{
    ConflictError, GlobalError, InjectError, MissingDependencyError, RequireError, ResolveError,
};
pub use factories::{DynFactory, InstanceFactory, IntoFactory, Outputs};
pub use handle::DiHandle;
pub use pool::{Item, Pool};
pub use record::{FieldBinder, Record};
pub use resolver::{dep::Dep, Resolver};
pub use types::{DependencyInfo, DynError, Injectable, Instance, TypeInfo};
