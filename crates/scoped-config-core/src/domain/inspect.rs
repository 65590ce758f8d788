//! Request and response types of the configuration service.
//!
//! These mirror the shapes the host application expects, so
//! [`InspectedValue`] and [`ConfigurationKeys`] serialize with camelCase
//! field names.

use serde::{Deserialize, Serialize};

use super::resource::Resource;
use super::tree::ConfigValue;

/// Optional scoping applied to a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationOverrides {
    /// Resolve against the override tree of the most specific ancestor of
    /// this resource, when one is stored.
    pub resource: Option<Resource>,
}

impl ConfigurationOverrides {
    /// No scoping: lookups use the global tree.
    pub fn none() -> Self {
        Self::default()
    }

    /// Scope lookups to `resource`.
    pub fn for_resource(resource: impl Into<Resource>) -> Self {
        Self {
            resource: Some(resource.into()),
        }
    }
}

/// Result of inspecting one key.
///
/// The store does not track which layer a value came from, so `value`,
/// `default_value` and `user_value` always hold the same resolved value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectedValue {
    pub value: Option<ConfigValue>,
    pub default_value: Option<ConfigValue>,
    pub user_value: Option<ConfigValue>,
    /// Override identifiers registered for the key, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_identifiers: Option<Vec<String>>,
}

/// Known configuration keys grouped by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationKeys {
    /// Property names known to the configuration registry.
    pub default: Vec<String>,
    /// Top-level keys of the global tree.
    pub user: Vec<String>,
    pub workspace: Vec<String>,
    pub workspace_folder: Vec<String>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
