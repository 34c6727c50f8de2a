//! Scoped environment-variable overrides for tests.
//!
//! The process environment is global, so every test that touches it must
//! hold the guard returned by [`lock_env`] for as long as its overrides live.

use std::{
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialises access to the process environment.
///
/// A poisoned lock is recovered, since a panicking test has already restored
/// its overrides through [`EnvGuard`]'s destructor.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restores an environment variable to its previous value on drop.
///
/// # Examples
/// ```
/// use edgewalk_test_support::env::{EnvGuard, lock_env};
///
/// let _lock = lock_env();
/// {
///     let _guard = EnvGuard::set("EDGEWALK_DOCTEST_VAR", "1");
///     assert_eq!(std::env::var("EDGEWALK_DOCTEST_VAR").as_deref(), Ok("1"));
/// }
/// assert!(std::env::var("EDGEWALK_DOCTEST_VAR").is_err());
/// ```
#[derive(Debug)]
pub struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    /// Sets `key` to `value` until the guard drops.
    #[must_use]
    pub fn set(key: &'static str, value: &str) -> Self {
        let original = env::var(key).ok();
        // SAFETY: callers hold the lock returned by `lock_env`.
        unsafe { env::set_var(key, value) };
        Self { key, original }
    }

    /// Removes `key` until the guard drops.
    #[must_use]
    pub fn unset(key: &'static str) -> Self {
        let original = env::var(key).ok();
        // SAFETY: callers hold the lock returned by `lock_env`.
        unsafe { env::remove_var(key) };
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            // SAFETY: callers hold the lock returned by `lock_env`.
            Some(value) => unsafe { env::set_var(self.key, value) },
            // SAFETY: callers hold the lock returned by `lock_env`.
            None => unsafe { env::remove_var(self.key) },
        }
    }
}
