//! Light/dark theme preference.
//!
//! The generated pages persist the visitor's choice in the browser's
//! `localStorage`. This module models the same contract so the key, values
//! and default used by the templates have a single source.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Key the theme is stored under in the host key-value store.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Color theme of a generated portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value stored in the host store and set as `data-theme`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// A string key-value store shared by everything rendered on one host.
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`ThemeStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    entries: HashMap<String, String>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Theme a page opens with: the stored choice, or light.
pub fn current_theme(store: &impl ThemeStore) -> Theme {
    store
        .get(THEME_STORAGE_KEY)
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Switch to the other theme and persist the choice.
pub fn toggle_theme(store: &mut impl ThemeStore) -> Theme {
    let next = current_theme(store).toggle();
    store.set(THEME_STORAGE_KEY, next.as_str());
    next
}
