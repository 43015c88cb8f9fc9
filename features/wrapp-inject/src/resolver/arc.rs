use std::sync::Arc;

use crate::{
    resolver::Resolver,
    types::{DependencyInfo, Injectable, TypeInfo},
};

impl<T: Injectable> Resolver for Arc<T> {
    fn dependency_info() -> DependencyInfo {
        DependencyInfo {
            type_info: TypeInfo::of::<Arc<T>>(),
            // Content can't be patched after the fact
            placeholder: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::resolver::Resolver;

    #[test]
    fn arc_is_not_a_reference_type() {
        let info = Arc::<String>::dependency_info();
        assert!(!info.is_reference());
        assert!(info.type_info.type_name.contains("Arc<alloc::string::String>"));
    }

    #[test]
    fn arc_identity_differs_from_inner_type() {
        assert_ne!(
            Arc::<String>::type_info().type_id,
            std::any::TypeId::of::<String>()
        );
    }
}
