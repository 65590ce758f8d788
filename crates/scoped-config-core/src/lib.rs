//! # scoped-config-core
//!
//! Shared domain types for scoped-config: configuration trees, resources,
//! the path-prefix override index, and the value types returned by
//! inspection and key enumeration.
//!
//! This crate has zero dependencies on I/O, async runtimes, or file formats.
//! The `scoped-config-store` crate builds the configuration service on top of it.
//!
//! # Architecture overview (for beginners)
//!
//! A configuration service answers questions like "what is `editor.fontSize`
//! for the file `/proj/src/main.ts`?".  The answer depends on two things:
//!
//! - **`tree`** – The global settings, stored as a nested JSON-like mapping.
//!   Keys may be looked up literally (`"editor.fontSize"` as one key) or by
//!   walking nested mappings one dotted segment at a time.
//!
//! - **`path_index`** – Per-resource overrides.  Each folder or file may carry
//!   its own settings; a lookup for a resource uses the override stored at the
//!   most specific ancestor path.
//!
//! - **`resource`** and **`inspect`** – The small value types passed in and
//!   out of the service.

pub mod domain;

pub use domain::inspect::{ConfigurationKeys, ConfigurationOverrides, InspectedValue};
pub use domain::path_index::PathIndex;
pub use domain::resource::Resource;
pub use domain::tree::{
    deep_merge, lookup, resolve_dotted, validate_key, ConfigTree, ConfigValue, KeyError,
};
