//! Optional process wide default pool
//!
//! Nothing exists until [`init`] is called, and [`teardown`] hands the pool back to the caller.
//! Prefer passing a [`Pool`] around - this is a convenience for small applications.

use parking_lot::Mutex;

use crate::{errors::GlobalError, pool::Pool};

static DEFAULT: Mutex<Option<Pool>> = Mutex::new(None);

/// Creates the default pool
pub fn init() -> Result<(), GlobalError> {
    let mut default = DEFAULT.lock();
    if default.is_some() {
        return Err(GlobalError::AlreadyInitialized);
    }

    tracing::debug!("Initialized default pool");
    *default = Some(Pool::new());
    Ok(())
}

/// Runs `f` with the default pool
///
/// The pool is locked while `f` runs, calling into this module from `f` deadlocks.
pub fn with_default<T>(f: impl FnOnce(&mut Pool) -> T) -> Result<T, GlobalError> {
    let mut default = DEFAULT.lock();
    let pool = default.as_mut().ok_or(GlobalError::NotInitialized)?;
    Ok(f(pool))
}

/// Removes the default pool, returning it
pub fn teardown() -> Option<Pool> {
    let pool = DEFAULT.lock().take();
    if pool.is_some() {
        tracing::debug!("Tore down default pool");
    }
    pool
}

pub fn is_initialized() -> bool {
    DEFAULT.lock().is_some()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ResolveMode;

    // The default pool is shared by every test in the process,
    // so the whole lifecycle is checked in a single test.
    #[test]
    fn lifecycle() {
        assert!(matches!(
            with_default(|_| ()),
            Err(GlobalError::NotInitialized)
        ));

        init().unwrap();
        assert!(is_initialized());
        assert!(matches!(init(), Err(GlobalError::AlreadyInitialized)));

        with_default(|pool| {
            pool.add_factory(|| Arc::new(String::from("global")));
            pool.resolve(ResolveMode::Safe)
        })
        .unwrap()
        .unwrap();

        let name = with_default(|pool| pool.find::<Arc<String>>())
            .unwrap()
            .unwrap();
        assert_eq!(*name, "global");

        let pool = teardown().expect("was initialized");
        assert_eq!(pool.len(), 1);
        assert!(!is_initialized());
        assert!(teardown().is_none());
    }
}
