use crate::{
    errors::{MissingDependencyError, ResolveError},
    initiator::{names, unique, DiInitiator},
    types::{Instance, Placeholder, TypeInfo},
};

/// Where a factory argument comes from during stub resolution
enum Argument {
    Available(Instance),
    Stub(TypeInfo, fn() -> Placeholder),
}

impl DiInitiator<'_> {
    /// Breaks dependency cycles
    ///
    /// Every pending factory is invoked exactly once, in pool order. Missing reference-typed
    /// dependencies are handed out as unbound placeholders. Afterwards each placeholder is bound
    /// in place to the real instance of its type, so the handles already stored by the factories
    /// observe the real value.
    pub(super) fn resolve_with_stubs(&mut self) -> Result<(), ResolveError> {
        tracing::debug!(
            "Breaking cycles for {} factories, missing: {}",
            self.pending.len(),
            names(&self.missing)
        );

        let mut placeholders: Vec<Placeholder> = Vec::new();
        let mut missing = Vec::new();

        // Invoke everything once, stubbing what is not there yet
        for pending in std::mem::take(&mut self.pending) {
            let arguments = match self.stub_arguments_for(&pending) {
                Ok(arguments) => arguments,
                Err(unmet) => {
                    tracing::warn!(
                        "{} can't be stubbed, missing: {}",
                        pending.factory.name(),
                        names(&unmet)
                    );
                    missing.extend(unmet);
                    missing.extend(pending.factory.supplies());
                    continue;
                }
            };

            let arguments = arguments
                .into_iter()
                .map(|argument| match argument {
                    Argument::Available(instance) => instance,
                    Argument::Stub(info, make) => stub_for(&mut placeholders, info, make),
                })
                .collect();

            self.invoke(pending, arguments)?;
        }

        // Bind every placeholder to the real value
        for placeholder in &placeholders {
            let info = placeholder.info();
            let bound = self
                .find(&info)
                .is_some_and(|real| placeholder.bind_to(real));

            if bound {
                tracing::trace!("Bound placeholder for {info}");
            } else {
                tracing::warn!("No instance of {info} to bind the placeholder to");
                missing.push(info);
            }
        }

        self.missing = unique(missing);
        if !self.missing.is_empty() {
            return Err(MissingDependencyError {
                missing: std::mem::take(&mut self.missing),
            }
            .into());
        }

        Ok(())
    }

    /// Decides the source of every argument
    ///
    /// Fails with the missing non-reference types, those can't be stubbed.
    fn stub_arguments_for(
        &self,
        pending: &super::PendingFactory<'_>,
    ) -> Result<Vec<Argument>, Vec<TypeInfo>> {
        let mut arguments = Vec::with_capacity(pending.dependencies.len());
        let mut unmet = Vec::new();

        for dependency in &pending.dependencies {
            let info = dependency.type_info;
            match (self.find(&info), dependency.placeholder) {
                (Some(instance), _) => arguments.push(Argument::Available(instance.clone())),
                (None, Some(make)) => arguments.push(Argument::Stub(info, make)),
                (None, None) => unmet.push(info),
            }
        }

        if unmet.is_empty() {
            Ok(arguments)
        } else {
            Err(unmet)
        }
    }
}

/// One placeholder per type, shared by every factory needing it
fn stub_for(
    placeholders: &mut Vec<Placeholder>,
    info: TypeInfo,
    make: fn() -> Placeholder,
) -> Instance {
    if let Some(existing) = placeholders.iter().find(|p| p.info() == info) {
        return existing.instance.clone();
    }

    tracing::trace!("Created placeholder for {info}");
    let placeholder = make();
    let instance = placeholder.instance.clone();
    placeholders.push(placeholder);
    instance
}
