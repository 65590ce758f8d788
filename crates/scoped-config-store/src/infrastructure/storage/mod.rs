//! Storage infrastructure: fixture file loading.
//!
//! The `fixture` sub-module reads a TOML description of a store's initial
//! state (global settings, per-resource overrides, override identifiers, and
//! registered property names) and turns it into a ready-to-use
//! `ScopedConfigurationStore`.

pub mod fixture;
