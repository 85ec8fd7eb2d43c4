// Pure key handling for the tag text field - no Tauri imports allowed.

pub const DEFAULT_COMMIT_KEYS: [&str; 3] = ["Enter", ";", ","];

/// The part of a DOM `KeyboardEvent` the store cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Exact, case-sensitive match against the configured commit keys.
pub fn is_commit_key<S: AsRef<str>>(key: &str, commit_keys: &[S]) -> bool {
    commit_keys.iter().any(|k| k.as_ref() == key)
}
