//! Configuration tree lookup.
//!
//! A configuration tree is a JSON-shaped mapping from string keys to values.
//! Keys are resolved in two steps:
//!
//! 1. **Literal** – the key is looked up as-is among the top-level entries.
//!    A tree may store `"editor.fontSize"` as a single flat key.
//! 2. **Dotted path** – when there is no usable literal entry, the key is split
//!    on `.` and each segment descends one level of nested mappings.
//!
//! Missing keys are never an error: absence is `None`.

use thiserror::Error;

/// A single configuration value (string, number, boolean, null, array, or mapping).
pub type ConfigValue = serde_json::Value;

/// A mapping from setting key to value.
///
/// Iteration follows insertion order (`serde_json` is built with
/// `preserve_order`), so enumerating keys reports them in the order they
/// were first set.
pub type ConfigTree = serde_json::Map<String, ConfigValue>;

/// Errors describing a malformed dotted configuration key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key is the empty string.
    #[error("configuration key is empty")]
    Empty,

    /// The key has a leading, trailing, or doubled `.` separator.
    #[error("configuration key '{key}' contains an empty segment")]
    EmptySegment { key: String },
}

/// Checks that `key` is a well-formed dotted path.
///
/// Lookups accept any string; this is used where keys come from outside the
/// process (fixture files) and a typo should be reported rather than silently
/// never matching.
///
/// # Errors
///
/// Returns [`KeyError::Empty`] for `""` and [`KeyError::EmptySegment`] for keys
/// such as `".a"`, `"a."`, or `"a..b"`.
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    if key.split('.').any(str::is_empty) {
        return Err(KeyError::EmptySegment {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Walks `path` segment by segment through nested mappings.  Arrays are
/// leaves: a numeric segment does not index into them.
///
/// Returns `None` as soon as a segment is missing or an intermediate value is
/// not a mapping.  A `null` leaf is returned as `Some(Value::Null)`.
pub fn resolve_dotted<'a>(tree: &'a ConfigTree, path: &str) -> Option<&'a ConfigValue> {
    let mut segments = path.split('.');
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Resolves `key` in `tree`: a non-null literal top-level entry wins, otherwise
/// the key is treated as a dotted path.
pub fn lookup<'a>(tree: &'a ConfigTree, key: &str) -> Option<&'a ConfigValue> {
    match tree.get(key) {
        Some(value) if !value.is_null() => Some(value),
        _ => resolve_dotted(tree, key),
    }
}

/// Lays `overlay` over `target`, descending into mappings present on both
/// sides.  Any other overlay value replaces the target's value outright.
pub fn deep_merge(target: &mut ConfigTree, overlay: &ConfigTree) {
    for (key, value) in overlay {
        match (target.get_mut(key), value) {
            (Some(ConfigValue::Object(existing)), ConfigValue::Object(nested)) => {
                deep_merge(existing, nested);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
