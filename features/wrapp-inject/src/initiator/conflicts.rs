use std::collections::HashSet;

use crate::{errors::ConflictError, pool::Item};

/// Fails if any type is supplied more than once across all factories
///
/// Registered values are not considered, they may share a type with anything.
pub(super) fn check_conflicts(items: &[Item]) -> Result<(), ConflictError> {
    let mut supplied = HashSet::new();

    for factory in items.iter().filter_map(Item::as_factory) {
        for info in factory.supplies() {
            if !supplied.insert(info) {
                tracing::warn!("'{}' is supplied twice, second by {}", info, factory.name());
                return Err(ConflictError { duplicate: info });
            }
        }
    }

    Ok(())
}
