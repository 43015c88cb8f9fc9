use crate::{
    errors::ResolveError,
    initiator::{unique, DiInitiator, Progress},
    types::{DependencyInfo, Instance, TypeInfo},
};

impl DiInitiator<'_> {
    /// Invokes every factory whose dependencies are available, until a pass makes no progress
    ///
    /// The invocation order follows from the passes, no explicit sort is needed.
    pub(super) fn resolve_eager(&mut self) -> Result<Progress, ResolveError> {
        let mut pass = 0;

        loop {
            pass += 1;
            let before = self.pending.len();
            let mut unmet = Vec::new();

            for pending in std::mem::take(&mut self.pending) {
                match self.arguments_for(&pending.dependencies) {
                    Ok(arguments) => self.invoke(pending, arguments)?,
                    Err(missing) => {
                        unmet.extend(missing);
                        self.pending.push(pending);
                    }
                }
            }

            tracing::debug!(
                "Eager pass {pass}: {} of {before} factories still pending",
                self.pending.len()
            );

            if self.pending.is_empty() {
                self.missing.clear();
                return Ok(Progress::Complete);
            }

            if self.pending.len() == before {
                self.missing = unique(unmet);
                return Ok(Progress::Stalled);
            }
        }
    }

    /// Collects the arguments for a factory, or every dependency that is not available
    fn arguments_for(
        &self,
        dependencies: &[DependencyInfo],
    ) -> Result<Vec<Instance>, Vec<TypeInfo>> {
        let mut arguments = Vec::with_capacity(dependencies.len());
        let mut unmet = Vec::new();

        for dependency in dependencies {
            match self.find(&dependency.type_info) {
                Some(instance) => arguments.push(instance.clone()),
                None => unmet.push(dependency.type_info),
            }
        }

        if unmet.is_empty() {
            Ok(arguments)
        } else {
            Err(unmet)
        }
    }
}
