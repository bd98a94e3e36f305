//! Global configuration options.

use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Global configuration options for the zarrs_impex crate.
///
/// Retrieve the global [`Config`] with [`global_config`] and modify it with [`global_config_mut`].
///
/// ## Overwrite Policy
/// > default: [`OverwritePolicy::Replace`]
///
/// The policy applied when a dataset is written to a path that already holds a dataset with a different descriptor.
/// A [`Container`](crate::container::Container) can override it with [`Container::set_overwrite_policy`](crate::container::Container::set_overwrite_policy).
#[derive(Debug)]
pub struct Config {
    overwrite_policy: OverwritePolicy,
}

/// What to do when a dataset is written over an existing dataset with a different descriptor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Erase the existing dataset and create a new one.
    #[default]
    Replace,
    /// Fail and leave the existing dataset untouched.
    Fail,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Config {
            overwrite_policy: OverwritePolicy::default(),
        }
    }
}

impl Config {
    /// Get the [overwrite policy](#overwrite-policy) configuration.
    #[must_use]
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite_policy
    }

    /// Set the [overwrite policy](#overwrite-policy) configuration.
    pub fn set_overwrite_policy(&mut self, overwrite_policy: OverwritePolicy) -> &mut Self {
        self.overwrite_policy = overwrite_policy;
        self
    }
}

static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Returns a reference to the global zarrs_impex configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config() -> RwLockReadGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .read()
        .unwrap()
}

/// Returns a mutable reference to the global zarrs_impex configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config_mut() -> RwLockWriteGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .write()
        .unwrap()
}
