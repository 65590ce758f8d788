//! Configuration change notifications.

/// Channel capacity for change notifications.  Slow subscribers that fall
/// further behind than this observe `RecvError::Lagged`.
pub const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Describes which keys a configuration change touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationChangeEvent {
    pub affected_keys: Vec<String>,
}

impl ConfigurationChangeEvent {
    pub fn new(affected_keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            affected_keys: affected_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `section` was changed, is nested inside a changed key,
    /// or contains a changed key.
    ///
    /// A change to `editor.fontSize` affects `editor` and `editor.fontSize`,
    /// but not `editor.font` or `editorconfig`.
    pub fn affects_configuration(&self, section: &str) -> bool {
        self.affected_keys
            .iter()
            .any(|key| key == section || is_dotted_child(key, section) || is_dotted_child(section, key))
    }
}

fn is_dotted_child(candidate: &str, parent: &str) -> bool {
    candidate
        .strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with('.'))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
