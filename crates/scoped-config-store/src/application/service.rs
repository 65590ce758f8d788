//! The configuration service capability surface.
//!
//! Host code depends on [`ConfigurationService`] rather than on a concrete
//! store, so a real, file-backed service and the in-memory test store are
//! interchangeable.
//!
//! # Completions
//!
//! Some operations (updates, reload) would perform I/O in a real service and
//! therefore return futures.  The in-memory store has no deferred work, so it
//! returns [`Completion`], a future that is already resolved.  Call sites can
//! `.await` it exactly as they would a real service's future.

use std::future::Ready;

use scoped_config_core::{
    ConfigValue, ConfigurationKeys, ConfigurationOverrides, InspectedValue,
};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use super::change_events::ConfigurationChangeEvent;
use crate::error::StoreError;

/// A future that is resolved at the moment it is created.
pub type Completion<T> = Ready<T>;

/// Read, update, and observe configuration values.
pub trait ConfigurationService {
    /// Resolves `key` (or the whole tree when `key` is `None`) under `overrides`.
    ///
    /// Missing keys are `None`, never an error.
    fn get_value(&self, key: Option<&str>, overrides: &ConfigurationOverrides)
        -> Option<ConfigValue>;

    /// Requests that `key` be set to `value`.
    fn update_value(&mut self, key: &str, value: ConfigValue) -> Completion<()>;

    /// Resolves `key` together with its layer values and override identifiers.
    fn inspect(&self, key: &str, overrides: &ConfigurationOverrides) -> InspectedValue;

    /// Enumerates known keys by scope.
    fn keys(&self) -> ConfigurationKeys;

    /// Re-reads configuration sources and yields the resulting global tree.
    fn reload_configuration(&self) -> Completion<ConfigValue>;

    /// Subscribes to configuration change notifications.
    fn on_did_change_configuration(&self) -> broadcast::Receiver<ConfigurationChangeEvent>;

    /// Unscoped lookup of a single key.
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.get_value(Some(key), &ConfigurationOverrides::none())
    }

    /// Typed lookup of a single key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TypeMismatch`] if the key is present but its value
    /// does not deserialize into `T`.
    fn get_value_as<T>(
        &self,
        key: &str,
        overrides: &ConfigurationOverrides,
    ) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        self.get_value(Some(key), overrides)
            .map(|value| {
                serde_json::from_value(value).map_err(|source| StoreError::TypeMismatch {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }
}
