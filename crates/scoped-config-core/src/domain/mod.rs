//! Domain entities for scoped-config.
//!
//! This module contains pure lookup logic with no infrastructure dependencies.
//! Nothing here reads files, spawns tasks, or logs above `trace` level, so
//! every type can be unit-tested in isolation.

/// Value types exchanged with the configuration service.
pub mod inspect;

/// Segment trie used to find the most specific resource override.
///
/// See [`path_index::PathIndex`] for the main type.
pub mod path_index;

pub mod resource;

/// Configuration tree helpers: literal and dotted-path lookup.
pub mod tree;
