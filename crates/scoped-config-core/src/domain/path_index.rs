//! Path-prefix index for per-resource overrides.
//!
//! The index is a trie keyed by path segments.  Each node may hold a value;
//! a lookup walks the segments of the queried path and remembers the deepest
//! node that held one.  That node's path is the most specific stored ancestor
//! of the query (or the query itself).
//!
//! ```text
//! root
//!  └─ proj            value: { theme = "dark" }
//!      ├─ src         (no value)
//!      │   └─ lib     value: { fontSize = 14 }
//!      └─ docs        (no value)
//!
//! /proj/src/lib/a.rs  → matches /proj/src/lib
//! /proj/docs/x.md     → matches /proj
//! /project/a.rs       → no match ("project" ≠ "proj")
//! ```
//!
//! # Why a trie instead of string prefix checks?
//!
//! Matching whole segments avoids the classic bug where `/proj` is treated as
//! an ancestor of `/project`.  The walk is O(depth of the queried path)
//! regardless of how many overrides are stored.

use std::collections::BTreeMap;

use tracing::trace;

use super::resource::Resource;

#[derive(Debug, Clone)]
struct Node<T> {
    value: Option<T>,
    children: BTreeMap<String, Node<T>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

/// A segment trie mapping resource paths to values.
#[derive(Debug, Clone)]
pub struct PathIndex<T> {
    root: Node<T>,
    len: usize,
}

impl<T> Default for PathIndex<T> {
    fn default() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }
}

impl<T> PathIndex<T> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths holding a value.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no path holds a value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` at exactly `resource`'s path, returning the previous value.
    pub fn insert(&mut self, resource: &Resource, value: T) -> Option<T> {
        let node = descend_or_create(&mut self.root, resource);
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns the value stored at exactly `resource`'s path.
    pub fn get(&self, resource: &Resource) -> Option<&T> {
        let mut node = &self.root;
        for segment in resource.segments() {
            node = node.children.get(segment)?;
        }
        node.value.as_ref()
    }

    /// Returns the value at exactly `resource`'s path, inserting `make()` first
    /// if there is none.
    pub fn get_or_insert_with(&mut self, resource: &Resource, make: impl FnOnce() -> T) -> &mut T {
        let node = descend_or_create(&mut self.root, resource);
        if node.value.is_none() {
            self.len += 1;
        }
        node.value.get_or_insert_with(make)
    }

    /// Finds the value stored at the most specific ancestor of `resource`
    /// (the path itself counts as its own ancestor).
    pub fn longest_prefix_match(&self, resource: &Resource) -> Option<&T> {
        let mut node = &self.root;
        let mut best = node.value.as_ref();
        let mut best_depth = 0usize;

        for (depth, segment) in resource.segments().enumerate() {
            let Some(child) = node.children.get(segment) else {
                break;
            };
            node = child;
            if node.value.is_some() {
                best = node.value.as_ref();
                best_depth = depth + 1;
            }
        }

        trace!(
            resource = %resource,
            matched = best.is_some(),
            depth = best_depth,
            "override index lookup"
        );
        best
    }
}

fn descend_or_create<'a, T>(root: &'a mut Node<T>, resource: &Resource) -> &'a mut Node<T> {
    let mut node = root;
    for segment in resource.segments() {
        node = node.children.entry(segment.to_string()).or_default();
    }
    node
}

// ── Tests ─────────────────────────────────────────────────────────────────────
