//! TOML fixtures describing an initial store state.
//!
//! Test suites often need the same configuration in many places.  Rather
//! than repeating `set_user_configuration` calls, a fixture file captures the
//! whole state once:
//!
//! ```toml
//! [settings]
//! editor = { fontSize = 12 }
//! "files.autoSave" = "off"
//!
//! [[resources]]
//! path = "/proj"
//! settings = { theme = "dark" }
//!
//! [override_identifiers]
//! "editor.tabSize" = ["typescript", "rust"]
//!
//! [registry]
//! properties = ["editor.fontSize", "editor.tabSize"]
//! ```
//!
//! Every section is optional; `#[serde(default)]` fills in empty values so a
//! zero-byte file yields an empty store.
//!
//! Quoted TOML keys such as `"files.autoSave"` are stored as a single literal
//! key, exactly like `set_user_configuration("files.autoSave", ..)`.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use scoped_config_core::{validate_key, ConfigTree, Resource};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::registry::InMemoryConfigurationRegistry;
use crate::application::scoped_store::ScopedConfigurationStore;
use crate::error::StoreError;

// ── Fixture schema types ──────────────────────────────────────────────────────

/// Top-level fixture document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StoreFixture {
    /// Initial global tree.
    #[serde(default)]
    pub settings: ConfigTree,
    /// Per-resource override trees.
    #[serde(default)]
    pub resources: Vec<ResourceFixture>,
    /// Override identifiers per key.
    #[serde(default)]
    pub override_identifiers: BTreeMap<String, Vec<String>>,
    /// Property names reported as `keys().default`.
    #[serde(default)]
    pub registry: RegistryFixture,
}

/// Settings scoped to one resource path.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResourceFixture {
    pub path: String,
    #[serde(default)]
    pub settings: ConfigTree,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RegistryFixture {
    #[serde(default)]
    pub properties: Vec<String>,
}

impl StoreFixture {
    /// Parses and validates a fixture from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] for malformed TOML or a schema mismatch,
    /// [`StoreError::InvalidKey`] for malformed keys, and
    /// [`StoreError::InvalidResource`] for empty resource paths.
    pub fn from_toml_str(content: &str) -> Result<Self, StoreError> {
        let fixture: StoreFixture = toml::from_str(content)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Checks every key and resource path in the fixture.
    ///
    /// # Errors
    ///
    /// See [`StoreFixture::from_toml_str`].
    pub fn validate(&self) -> Result<(), StoreError> {
        for key in self.settings.keys() {
            validate_key(key)?;
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            // Only a literal "/" may address the root; "//" or "\\" would
            // silently apply to every resource.
            let parsed = Resource::file(resource.path.as_str());
            if resource.path.trim().is_empty() || (parsed.is_root() && resource.path != "/") {
                return Err(StoreError::InvalidResource(resource.path.clone()));
            }
            let segments: Vec<String> = parsed
                .segments()
                .map(str::to_string)
                .collect();
            if !seen.insert(segments) {
                warn!(
                    path = %resource.path,
                    "duplicate resource entry in fixture; its settings are merged into the earlier one"
                );
            }
            for key in resource.settings.keys() {
                validate_key(key)?;
            }
        }

        for key in self.override_identifiers.keys() {
            validate_key(key)?;
        }
        for property in &self.registry.properties {
            validate_key(property)?;
        }
        Ok(())
    }

    /// Builds a store holding exactly the state this fixture describes.
    pub fn into_store(self) -> ScopedConfigurationStore {
        let registry: InMemoryConfigurationRegistry =
            self.registry.properties.into_iter().collect();
        let mut store =
            ScopedConfigurationStore::new(Some(self.settings)).with_registry(Arc::new(registry));

        for entry in self.resources {
            let resource = Resource::file(entry.path);
            for (key, value) in entry.settings {
                store.write_user_value(&key, value, Some(&resource));
            }
        }
        for (key, identifiers) in self.override_identifiers {
            store.set_override_identifiers(&key, identifiers);
        }

        debug!(
            resources = store.resource_override_count(),
            "store built from fixture"
        );
        store
    }
}

/// Reads and validates the fixture at `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read (including when it
/// does not exist), otherwise the errors of [`StoreFixture::from_toml_str`].
pub fn load_fixture(path: &Path) -> Result<StoreFixture, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading configuration fixture");
    StoreFixture::from_toml_str(&content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
