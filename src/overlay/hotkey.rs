use serde::{Deserialize, Serialize};

pub const DEFAULT_HOTKEY_LABEL: &str = "Ctrl+Alt+K";

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn ctrl(mut self) -> Self { self.ctrl = true; self }
    pub fn alt(mut self) -> Self { self.alt = true; self }
    pub fn shift(mut self) -> Self { self.shift = true; self }
    pub fn meta(mut self) -> Self { self.meta = true; self }

    /// Ctrl or Cmd, plus Alt, plus K. The configured hotkey label is display
    /// only and does not change this.
    pub fn is_toggle_chord(&self) -> bool {
        (self.ctrl || self.meta) && self.alt && self.key.eq_ignore_ascii_case("k")
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl { parts.push("Ctrl"); }
        if self.meta { parts.push("Cmd"); }
        if self.alt { parts.push("Alt"); }
        if self.shift { parts.push("Shift"); }
        let key = self.key.to_uppercase();
        parts.push(&key);
        parts.join("+")
    }
}
