//! scoped-config-store library entry point.
//!
//! An in-memory configuration service for test harnesses.  It answers
//! setting lookups from a global tree and from per-resource override trees,
//! records override identifiers, and exposes the same capability surface as a
//! real configuration service (pre-resolved completions, a change-event
//! subscription point) so host code can run against it unchanged.
//!
//! # Layers
//!
//! ```text
//! application/      ConfigurationService trait, ScopedConfigurationStore,
//!                   registry collaborator, change events
//! infrastructure/   TOML fixture loading
//! scoped-config-core (domain): trees, resources, PathIndex
//! ```

pub mod application;
pub mod error;
pub mod infrastructure;

pub use application::change_events::ConfigurationChangeEvent;
pub use application::registry::{ConfigurationRegistry, InMemoryConfigurationRegistry};
pub use application::scoped_store::ScopedConfigurationStore;
pub use application::service::{Completion, ConfigurationService};
pub use error::StoreError;
pub use infrastructure::storage::fixture::{load_fixture, StoreFixture};
