use crate::{
    errors::{InjectError, RequireError},
    resolver::Resolver,
    types::{Instance, TypeInfo},
};

/// Arguments resolved for a single factory invocation
///
/// The handle only holds what the factory declared in its dependencies,
/// in declaration order. Some arguments may be placeholders if the pool is breaking a cycle.
pub struct DiHandle {
    arguments: Vec<Instance>,
}
impl DiHandle {
    pub(crate) fn new(arguments: Vec<Instance>) -> Self {
        DiHandle { arguments }
    }

    /// Gets the argument of the given type
    pub fn resolve<R: Resolver>(&self) -> Result<R, InjectError> {
        let info = TypeInfo::of::<R>();
        let instance = self
            .arguments
            .iter()
            .find(|argument| argument.is(&info))
            .ok_or(RequireError::TypeMissing(info.type_name))?;

        let resolved = instance
            .downcast::<R>()
            .map_err(|actual_type| RequireError::DowncastFailed {
                required_type: info.type_name,
                actual_type,
            })?;

        Ok(resolved)
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}
