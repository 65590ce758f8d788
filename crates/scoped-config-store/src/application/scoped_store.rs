//! ScopedConfigurationStore: in-memory configuration with per-resource overrides.
//!
//! The store holds three pieces of state:
//!
//! - The **global tree** – settings that apply everywhere.
//! - The **override index** – a [`PathIndex`] from resource paths to override
//!   trees.  A lookup scoped to a resource consults the override stored at the
//!   resource's most specific ancestor.
//! - **Override identifiers** – per-key lists of scope tags (e.g. language ids),
//!   stored verbatim and only reported back through `inspect`.
//!
//! # Resolution order
//!
//! ```text
//! get_value("editor.fontSize", resource = /proj/src/a.ts)
//!   1. longest-prefix match in the override index   → tree stored at /proj
//!   2. resolve the key in that tree (literal, then dotted)
//!   3. not found there? resolve the key in the global tree
//!   4. found in both as mappings? deep-merge them, override winning
//! ```
//!
//! # What this store deliberately does not do
//!
//! It is a test double.  `update_value` accepts and discards updates, no
//! change notification is ever published, and `inspect` does not distinguish
//! default and user layers.

use std::collections::HashMap;
use std::future::ready;
use std::sync::Arc;

use scoped_config_core::{
    deep_merge, lookup, ConfigTree, ConfigValue, ConfigurationKeys, ConfigurationOverrides, InspectedValue,
    PathIndex, Resource,
};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::change_events::{ConfigurationChangeEvent, CHANGE_CHANNEL_CAPACITY};
use super::registry::{ConfigurationRegistry, InMemoryConfigurationRegistry};
use super::service::{Completion, ConfigurationService};

/// In-memory [`ConfigurationService`] with resource-scoped overrides.
pub struct ScopedConfigurationStore {
    configuration: ConfigTree,
    configuration_by_root: PathIndex<ConfigTree>,
    override_identifiers: HashMap<String, Vec<String>>,
    registry: Arc<dyn ConfigurationRegistry>,
    change_tx: broadcast::Sender<ConfigurationChangeEvent>,
}

impl ScopedConfigurationStore {
    /// Creates a store whose global tree is `initial`, or empty when `None`.
    ///
    /// The default-property registry starts empty; see [`Self::with_registry`].
    pub fn new(initial: Option<ConfigTree>) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            configuration: initial.unwrap_or_default(),
            configuration_by_root: PathIndex::new(),
            override_identifiers: HashMap::new(),
            registry: Arc::new(InMemoryConfigurationRegistry::new()),
            change_tx,
        }
    }

    /// Replaces the registry consulted by `keys().default`.
    pub fn with_registry(mut self, registry: Arc<dyn ConfigurationRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Sets `key` on the global tree, or on the override tree stored at
    /// exactly `resource`'s path (created on first use).
    ///
    /// The key is stored literally: `"editor.fontSize"` becomes one flat entry,
    /// which lookups find before trying dotted traversal.  Always succeeds.
    pub fn set_user_configuration(
        &mut self,
        key: &str,
        value: ConfigValue,
        resource: Option<&Resource>,
    ) -> Completion<()> {
        self.write_user_value(key, value, resource);
        ready(())
    }

    /// Replaces the override identifiers recorded for `key`.
    pub fn set_override_identifiers(&mut self, key: &str, identifiers: Vec<String>) {
        debug!(key, ?identifiers, "set override identifiers");
        self.override_identifiers.insert(key.to_string(), identifiers);
    }

    /// Number of resource paths carrying an override tree.
    pub fn resource_override_count(&self) -> usize {
        self.configuration_by_root.len()
    }

    pub(crate) fn write_user_value(
        &mut self,
        key: &str,
        value: ConfigValue,
        resource: Option<&Resource>,
    ) {
        match resource {
            Some(resource) => {
                debug!(key, resource = %resource, "set resource configuration");
                self.configuration_by_root
                    .get_or_insert_with(resource, ConfigTree::new)
                    .insert(key.to_string(), value);
            }
            None => {
                debug!(key, "set user configuration");
                self.configuration.insert(key.to_string(), value);
            }
        }
    }

    /// The override tree that applies to `overrides`, if any.
    fn scoped_tree(&self, overrides: &ConfigurationOverrides) -> Option<&ConfigTree> {
        overrides
            .resource
            .as_ref()
            .and_then(|resource| self.configuration_by_root.longest_prefix_match(resource))
    }

    /// Resolves `key` in the scoped tree, falling back to the global tree.
    ///
    /// When both trees hold a mapping for the key the two are deep-merged, so
    /// a parent key reports the same leaves that dotted lookups would find.
    fn resolve(&self, scoped: Option<&ConfigTree>, key: &str) -> Option<ConfigValue> {
        let global = lookup(&self.configuration, key);
        match (scoped.and_then(|tree| lookup(tree, key)), global) {
            (Some(ConfigValue::Object(overlay)), Some(ConfigValue::Object(base))) => {
                let mut merged = base.clone();
                deep_merge(&mut merged, overlay);
                Some(ConfigValue::Object(merged))
            }
            (Some(value), _) => Some(value.clone()),
            (None, global) => global.cloned(),
        }
    }

    /// The global tree with the scoped tree deep-merged over it.
    fn resolved_tree(&self, scoped: Option<&ConfigTree>) -> ConfigTree {
        let mut tree = self.configuration.clone();
        if let Some(scoped) = scoped {
            deep_merge(&mut tree, scoped);
        }
        tree
    }
}

impl Default for ScopedConfigurationStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ConfigurationService for ScopedConfigurationStore {
    fn get_value(
        &self,
        key: Option<&str>,
        overrides: &ConfigurationOverrides,
    ) -> Option<ConfigValue> {
        let scoped = self.scoped_tree(overrides);
        // An empty key addresses the whole tree, like an absent one.
        match key.filter(|k| !k.is_empty()) {
            Some(key) => {
                let value = self.resolve(scoped, key);
                trace!(key, scoped = scoped.is_some(), found = value.is_some(), "get value");
                value
            }
            None => Some(ConfigValue::Object(self.resolved_tree(scoped))),
        }
    }

    fn update_value(&mut self, key: &str, _value: ConfigValue) -> Completion<()> {
        debug!(key, "update_value ignored by in-memory store");
        ready(())
    }

    fn inspect(&self, key: &str, overrides: &ConfigurationOverrides) -> InspectedValue {
        let value = self.resolve(self.scoped_tree(overrides), key);
        InspectedValue {
            default_value: value.clone(),
            user_value: value.clone(),
            value,
            override_identifiers: self.override_identifiers.get(key).cloned(),
        }
    }

    fn keys(&self) -> ConfigurationKeys {
        ConfigurationKeys {
            default: self.registry.property_names(),
            user: self.configuration.keys().cloned().collect(),
            workspace: Vec::new(),
            workspace_folder: Vec::new(),
        }
    }

    fn reload_configuration(&self) -> Completion<ConfigValue> {
        ready(ConfigValue::Object(self.configuration.clone()))
    }

    fn on_did_change_configuration(&self) -> broadcast::Receiver<ConfigurationChangeEvent> {
        self.change_tx.subscribe()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::MockConfigurationRegistry;
    use serde_json::json;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio_test::{assert_ready, block_on, task};

    fn tree(value: ConfigValue) -> ConfigTree {
        match value {
            ConfigValue::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn store_with(value: ConfigValue) -> ScopedConfigurationStore {
        ScopedConfigurationStore::new(Some(tree(value)))
    }

    fn at(path: &str) -> ConfigurationOverrides {
        ConfigurationOverrides::for_resource(path)
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_without_tree_starts_empty() {
        let store = ScopedConfigurationStore::new(None);
        assert_eq!(store.get_value(None, &ConfigurationOverrides::none()), Some(json!({})));
        assert_eq!(store.resource_override_count(), 0);
    }

    // ── get_value ─────────────────────────────────────────────────────────────

    #[test]
    fn test_get_value_resolves_literal_nested_and_missing_keys() {
        // Arrange
        let store = store_with(json!({ "editor": { "fontSize": 12 } }));

        // Act / Assert
        assert_eq!(store.get("editor.fontSize"), Some(json!(12)));
        assert_eq!(store.get("editor"), Some(json!({ "fontSize": 12 })));
        assert_eq!(store.get("missing.path"), None);
    }

    #[test]
    fn test_get_value_without_key_returns_global_tree() {
        let store = store_with(json!({ "a": 1, "b": { "c": 2 } }));
        assert_eq!(
            store.get_value(None, &ConfigurationOverrides::none()),
            Some(json!({ "a": 1, "b": { "c": 2 } }))
        );
    }

    #[test]
    fn test_get_value_with_empty_key_returns_whole_tree() {
        let store = store_with(json!({ "a": 1 }));
        assert_eq!(
            store.get_value(Some(""), &ConfigurationOverrides::none()),
            Some(json!({ "a": 1 }))
        );
    }

    #[test]
    fn test_get_value_prefers_resource_override() {
        // Arrange
        let mut store = store_with(json!({ "theme": "light" }));
        block_on(store.set_user_configuration("theme", json!("dark"), Some(&Resource::file("/proj"))));

        // Act / Assert
        assert_eq!(store.get_value(Some("theme"), &at("/proj/file.ts")), Some(json!("dark")));
        assert_eq!(store.get("theme"), Some(json!("light")), "global tree is unaffected");
    }

    #[test]
    fn test_get_value_falls_back_to_global_when_override_lacks_key() {
        let mut store = store_with(json!({ "editor": { "fontSize": 12 } }));
        block_on(store.set_user_configuration("theme", json!("dark"), Some(&Resource::file("/proj"))));

        assert_eq!(
            store.get_value(Some("editor.fontSize"), &at("/proj/file.ts")),
            Some(json!(12))
        );
    }

    #[test]
    fn test_get_value_for_unrelated_resource_uses_global_tree() {
        let mut store = store_with(json!({ "theme": "light" }));
        block_on(store.set_user_configuration("theme", json!("dark"), Some(&Resource::file("/proj"))));

        assert_eq!(store.get_value(Some("theme"), &at("/other/file.ts")), Some(json!("light")));
        assert_eq!(store.get_value(Some("theme"), &at("/project/file.ts")), Some(json!("light")));
    }

    #[test]
    fn test_get_value_uses_most_specific_override() {
        // Arrange
        let mut store = ScopedConfigurationStore::default();
        block_on(store.set_user_configuration("tabSize", json!(2), Some(&Resource::file("/proj"))));
        block_on(store.set_user_configuration("tabSize", json!(8), Some(&Resource::file("/proj/vendor"))));

        // Act / Assert
        assert_eq!(store.get_value(Some("tabSize"), &at("/proj/vendor/lib.c")), Some(json!(8)));
        assert_eq!(store.get_value(Some("tabSize"), &at("/proj/src/main.c")), Some(json!(2)));
        assert_eq!(store.resource_override_count(), 2);
    }

    #[test]
    fn test_get_value_without_key_merges_override_over_global() {
        let mut store = store_with(json!({ "theme": "light", "wordWrap": "off" }));
        block_on(store.set_user_configuration("theme", json!("dark"), Some(&Resource::file("/proj"))));

        assert_eq!(
            store.get_value(None, &at("/proj/a.ts")),
            Some(json!({ "theme": "dark", "wordWrap": "off" }))
        );
    }

    #[test]
    fn test_literal_dotted_override_shadows_nested_global() {
        let mut store = store_with(json!({ "editor": { "fontSize": 12 } }));
        block_on(store.set_user_configuration(
            "editor.fontSize",
            json!(16),
            Some(&Resource::file("/proj")),
        ));

        assert_eq!(store.get_value(Some("editor.fontSize"), &at("/proj/a.ts")), Some(json!(16)));
        assert_eq!(store.get("editor.fontSize"), Some(json!(12)));
    }

    #[test]
    fn test_override_mapping_deep_merges_with_global_mapping() {
        // Arrange
        let mut store = store_with(json!({ "editor": { "fontSize": 12 } }));
        block_on(store.set_user_configuration(
            "editor",
            json!({ "tabSize": 2 }),
            Some(&Resource::file("/proj")),
        ));
        let scope = at("/proj/a.ts");

        // Act
        let parent = store.get_value(Some("editor"), &scope);
        let leaf = store.get_value(Some("editor.fontSize"), &scope);
        let whole = store.get_value(None, &scope);

        // Assert
        assert_eq!(parent, Some(json!({ "fontSize": 12, "tabSize": 2 })));
        assert_eq!(leaf, Some(json!(12)));
        assert_eq!(whole, Some(json!({ "editor": { "fontSize": 12, "tabSize": 2 } })));
        assert_eq!(store.inspect("editor", &scope).value, parent);
        assert_eq!(store.get("editor"), Some(json!({ "fontSize": 12 })), "global tree is unaffected");
    }

    #[test]
    fn test_override_scalar_replaces_global_mapping() {
        let mut store = store_with(json!({ "editor": { "fontSize": 12 } }));
        block_on(store.set_user_configuration("editor", json!("off"), Some(&Resource::file("/proj"))));

        let scope = at("/proj/a.ts");
        assert_eq!(store.get_value(Some("editor"), &scope), Some(json!("off")));
        assert_eq!(store.get_value(Some("editor.fontSize"), &scope), Some(json!(12)));
    }

    #[test]
    fn test_fallback_skips_less_specific_overrides() {
        // Arrange: "a" lives only on /proj, the lookup matches /proj/sub.
        let mut store = ScopedConfigurationStore::default();
        block_on(store.set_user_configuration("a", json!(1), Some(&Resource::file("/proj"))));
        block_on(store.set_user_configuration("b", json!(2), Some(&Resource::file("/proj/sub"))));
        let scope = at("/proj/sub/x");

        // Act / Assert
        assert_eq!(store.get_value(Some("b"), &scope), Some(json!(2)));
        assert_eq!(store.get_value(Some("a"), &scope), None);
        assert_eq!(store.get_value(None, &scope), Some(json!({ "b": 2 })));
    }

    #[test]
    fn test_get_value_as_deserializes_typed_values() {
        let store = store_with(json!({ "editor": { "fontSize": 12, "rulers": [80, 120] } }));
        let none = ConfigurationOverrides::none();

        let size: Option<u32> = store.get_value_as("editor.fontSize", &none).expect("typed read");
        let rulers: Option<Vec<u32>> = store.get_value_as("editor.rulers", &none).expect("typed read");
        let missing: Option<u32> = store.get_value_as("editor.missing", &none).expect("typed read");

        assert_eq!(size, Some(12));
        assert_eq!(rulers, Some(vec![80, 120]));
        assert_eq!(missing, None);
    }

    #[test]
    fn test_get_value_as_reports_type_mismatch() {
        let store = store_with(json!({ "theme": "dark" }));
        let result: Result<Option<u32>, _> =
            store.get_value_as("theme", &ConfigurationOverrides::none());
        assert!(matches!(result, Err(crate::StoreError::TypeMismatch { ref key, .. }) if key == "theme"));
    }

    // ── set_user_configuration / update_value ─────────────────────────────────

    #[test]
    fn test_set_user_configuration_sets_global_value() {
        let mut store = ScopedConfigurationStore::default();
        block_on(store.set_user_configuration("theme", json!("dark"), None));
        assert_eq!(store.get("theme"), Some(json!("dark")));
    }

    #[test]
    fn test_set_user_configuration_last_write_wins() {
        let mut store = ScopedConfigurationStore::default();
        block_on(store.set_user_configuration("theme", json!("dark"), None));
        block_on(store.set_user_configuration("theme", json!("solarized"), None));
        assert_eq!(store.get("theme"), Some(json!("solarized")));
    }

    #[test]
    fn test_update_value_never_changes_observed_values() {
        // Arrange
        let mut store = store_with(json!({ "theme": "light" }));

        // Act
        block_on(store.update_value("theme", json!("dark")));
        block_on(store.update_value("brandNew", json!(true)));

        // Assert
        assert_eq!(store.get("theme"), Some(json!("light")));
        assert_eq!(store.get("brandNew"), None);
    }

    #[test]
    fn test_completions_are_ready_on_first_poll() {
        let mut store = ScopedConfigurationStore::default();

        let mut update = task::spawn(store.update_value("a", json!(1)));
        assert_ready!(update.poll());

        let mut set = task::spawn(store.set_user_configuration("a", json!(1), None));
        assert_ready!(set.poll());

        let mut reload = task::spawn(store.reload_configuration());
        assert_eq!(assert_ready!(reload.poll()), json!({ "a": 1 }));
    }

    // ── inspect ───────────────────────────────────────────────────────────────

    #[test]
    fn test_inspect_repeats_resolved_value_and_reports_identifiers() {
        // Arrange
        let mut store = store_with(json!({ "editor": { "tabSize": 4 } }));
        store.set_override_identifiers(
            "editor.tabSize",
            vec!["typescript".to_string(), "rust".to_string()],
        );

        // Act
        let inspected = store.inspect("editor.tabSize", &ConfigurationOverrides::none());

        // Assert
        assert_eq!(inspected.value, Some(json!(4)));
        assert_eq!(inspected.default_value, Some(json!(4)));
        assert_eq!(inspected.user_value, Some(json!(4)));
        assert_eq!(
            inspected.override_identifiers,
            Some(vec!["typescript".to_string(), "rust".to_string()])
        );
    }

    #[test]
    fn test_inspect_without_identifiers_reports_none() {
        let store = store_with(json!({ "a": 1 }));
        assert_eq!(store.inspect("a", &ConfigurationOverrides::none()).override_identifiers, None);
    }

    #[test]
    fn test_set_override_identifiers_replaces_previous_sequence() {
        let mut store = ScopedConfigurationStore::default();
        store.set_override_identifiers("k", vec!["a".to_string()]);
        store.set_override_identifiers("k", vec!["b".to_string(), "c".to_string()]);
        assert_eq!(
            store.inspect("k", &ConfigurationOverrides::none()).override_identifiers,
            Some(vec!["b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_inspect_honours_resource_scope() {
        let mut store = store_with(json!({ "theme": "light" }));
        block_on(store.set_user_configuration("theme", json!("dark"), Some(&Resource::file("/proj"))));
        assert_eq!(store.inspect("theme", &at("/proj/a.ts")).value, Some(json!("dark")));
    }

    // ── keys ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_keys_reports_registry_defaults_and_user_keys() {
        // Arrange
        let mut registry = MockConfigurationRegistry::new();
        registry
            .expect_property_names()
            .times(1)
            .returning(|| vec!["editor.fontSize".to_string()]);
        let mut store = store_with(json!({ "b": 1, "a": 2 }))
            .with_registry(Arc::new(registry));
        block_on(store.set_user_configuration("c", json!(3), None));
        block_on(store.set_user_configuration("scoped", json!(4), Some(&Resource::file("/proj"))));

        // Act
        let keys = store.keys();

        // Assert
        assert_eq!(keys.default, vec!["editor.fontSize".to_string()]);
        assert_eq!(keys.user, vec!["b".to_string(), "a".to_string(), "c".to_string()]);
        assert!(keys.workspace.is_empty());
        assert!(keys.workspace_folder.is_empty());
    }

    // ── change events ─────────────────────────────────────────────────────────

    #[test]
    fn test_no_change_event_is_published() {
        // Arrange
        let mut store = ScopedConfigurationStore::default();
        let mut rx = store.on_did_change_configuration();

        // Act
        block_on(store.set_user_configuration("a", json!(1), None));
        block_on(store.set_user_configuration("a", json!(2), Some(&Resource::file("/p"))));
        block_on(store.update_value("a", json!(3)));
        store.set_override_identifiers("a", vec![]);

        // Assert
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_dropping_store_closes_change_stream() {
        let store = ScopedConfigurationStore::default();
        let mut rx = store.on_did_change_configuration();
        drop(store);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Closed));
    }
}
