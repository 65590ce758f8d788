//! Registry of known configuration properties.
//!
//! The store does not own setting schemas; it only needs the list of property
//! names to report as `keys().default`.  Hosts plug in their own registry via
//! [`ConfigurationRegistry`]; [`InMemoryConfigurationRegistry`] covers tests
//! and fixtures.

#[cfg(test)]
use mockall::automock;

/// Lists the names of all configuration properties that have defaults.
#[cfg_attr(test, automock)]
pub trait ConfigurationRegistry: Send + Sync {
    fn property_names(&self) -> Vec<String>;
}

/// A registry backed by a list of property names.
///
/// Names are reported in registration order; registering a name twice keeps
/// the first position.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigurationRegistry {
    properties: Vec<String>,
}

impl InMemoryConfigurationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`.  Returns `false` if it was already known.
    pub fn register_property(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.properties.contains(&name) {
            return false;
        }
        self.properties.push(name);
        true
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryConfigurationRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for name in iter {
            registry.register_property(name);
        }
        registry
    }
}

impl ConfigurationRegistry for InMemoryConfigurationRegistry {
    fn property_names(&self) -> Vec<String> {
        self.properties.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
