//! Resources: files or folders that may carry their own configuration.

use std::fmt;
use std::path::Path;

/// Characters treated as path separators when splitting a resource path.
///
/// Both separators are accepted on every platform so that Windows-style and
/// POSIX-style paths index into the same override tree.
const SEPARATORS: [char; 2] = ['/', '\\'];

/// An addressable location identified by its filesystem path.
///
/// The path string is stored as given; comparisons used for override lookup go
/// through [`Resource::segments`], which drops empty segments so that
/// `/proj`, `/proj/` and `//proj` all address the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    fs_path: String,
}

impl Resource {
    /// Creates a resource for the file or folder at `fs_path`.
    pub fn file(fs_path: impl Into<String>) -> Self {
        Self {
            fs_path: fs_path.into(),
        }
    }

    /// Creates a resource from a [`Path`], replacing invalid UTF-8 lossily.
    pub fn from_path(path: &Path) -> Self {
        Self::file(path.to_string_lossy().into_owned())
    }

    /// Returns the path exactly as supplied at construction.
    pub fn fs_path(&self) -> &str {
        &self.fs_path
    }

    /// Iterates over the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.fs_path.split(SEPARATORS).filter(|s| !s.is_empty())
    }

    /// Returns `true` if the path has no segments (e.g. `/`).
    ///
    /// The root resource is an ancestor of every other resource.
    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fs_path)
    }
}

impl From<&str> for Resource {
    fn from(fs_path: &str) -> Self {
        Self::file(fs_path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
