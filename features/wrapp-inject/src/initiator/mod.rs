use std::{collections::HashSet, sync::Arc};

use crate::{
    config::ResolveMode,
    errors::{MissingDependencyError, ResolveError},
    factories::DynFactory,
    handle::DiHandle,
    pool::Item,
    types::{DependencyInfo, Instance, TypeInfo},
};

mod conflicts;
mod eager;
mod stub;

/// Resolves the items of a pool into instances
///
/// Runs the conflict check, then the eager passes, and, if they stall and the mode allows it,
/// breaks the remaining cycles with placeholders.
/// Factories are only borrowed - the caller decides what to do with the result.
pub(crate) struct DiInitiator<'p> {
    /// Everything constructed or registered so far, in pool order
    available: Vec<Instance>,
    /// Factories not yet invoked
    pending: Vec<PendingFactory<'p>>,
    /// Types which kept the last pass from completing
    missing: Vec<TypeInfo>,
    /// Number of factories invoked
    invoked: usize,
}

/// A factory waiting for its dependencies
///
/// Consumed on invocation, so a factory can't run twice.
struct PendingFactory<'p> {
    factory: &'p mut Box<dyn DynFactory>,
    dependencies: Vec<DependencyInfo>,
}

enum Progress {
    Complete,
    Stalled,
}

impl<'p> DiInitiator<'p> {
    pub(crate) fn initiate(
        items: &'p mut [Item],
        mode: ResolveMode,
    ) -> Result<Vec<Instance>, ResolveError> {
        // Conflicts are fatal - nothing may be invoked before this passed
        conflicts::check_conflicts(items)?;

        let mut initiator = DiInitiator::new(items);

        tracing::debug!(
            "Resolving {} factories and {} instances in {mode} mode",
            initiator.pending.len(),
            initiator.available.len()
        );

        if let Progress::Stalled = initiator.resolve_eager()? {
            if mode.is_safe() {
                let error = MissingDependencyError {
                    missing: initiator.missing,
                };
                tracing::warn!("{error}");
                return Err(error.into());
            }

            initiator.resolve_with_stubs()?;
        }

        tracing::debug!(
            "Resolution complete - invoked {} factories, {} instances available",
            initiator.invoked,
            initiator.available.len()
        );

        Ok(initiator.available)
    }

    fn new(items: &'p mut [Item]) -> Self {
        let mut available = Vec::new();
        let mut pending = Vec::new();

        for item in items {
            match item {
                Item::Value(instance) => available.push(instance.clone()),
                Item::Factory(factory) => {
                    let dependencies = factory.dependencies();
                    pending.push(PendingFactory {
                        factory,
                        dependencies,
                    });
                }
            }
        }

        DiInitiator {
            available,
            pending,
            missing: Vec::new(),
            invoked: 0,
        }
    }

    /// First available instance of the type
    fn find(&self, info: &TypeInfo) -> Option<&Instance> {
        self.available.iter().find(|instance| instance.is(info))
    }

    /// Invokes the factory and makes its outputs available
    fn invoke(
        &mut self,
        pending: PendingFactory<'p>,
        arguments: Vec<Instance>,
    ) -> Result<(), ResolveError> {
        let name = pending.factory.name();
        let handle = DiHandle::new(arguments);

        let produced =
            pending
                .factory
                .construct(&handle)
                .map_err(|error| ResolveError::FactoryFailed {
                    factory: name,
                    error: Arc::new(error),
                })?;

        tracing::debug!("Constructed {} instance(s) with {name}", produced.len());

        self.invoked += 1;
        self.available.extend(produced);
        Ok(())
    }
}

/// Removes repeated types, keeping the first occurrence
fn unique(types: impl IntoIterator<Item = TypeInfo>) -> Vec<TypeInfo> {
    let mut seen = HashSet::new();
    types.into_iter().filter(|info| seen.insert(*info)).collect()
}

fn names(types: &[TypeInfo]) -> String {
    types
        .iter()
        .map(|info| info.type_name)
        .collect::<Vec<_>>()
        .join(", ")
}
