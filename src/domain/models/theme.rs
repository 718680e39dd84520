//! Theme palette selection.

use serde::{Deserialize, Serialize};

/// The concrete palette the UI renders with. The persisted setting is the
/// raw theme *name* token, not this resolved value, so a "system" choice
/// keeps tracking the platform preference across restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Resolve a theme name token to a palette. `"light"` and `"dark"` map
    /// directly; any other token falls back to the system preference, and
    /// to light when no preference is available.
    pub fn resolve(name: &str, system_preference: Option<Theme>) -> Theme {
        match name {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            _ => system_preference.unwrap_or(Theme::Light),
        }
    }
}
