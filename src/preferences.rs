//! Theme preference store.
//!
//! A theme is either an explicit choice (`light`, `dark`) or `system`, which
//! follows the color scheme the platform reports. Only explicit user actions
//! are persisted; a missing or unreadable stored value means `system`.
//!
//! Storage is injected through [`PreferenceStorage`] so the same store works
//! against a JSON file (the CLI), memory (tests), or anything else keyed by
//! string. The generated site runs the equivalent logic in `static/theme.js`
//! against `localStorage`, using the same [`THEME_KEY`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown theme '{0}' (expected light, dark or system)")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// The color scheme actually applied to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Effective scheme given what the platform currently prefers.
    pub fn resolve(self, platform: ColorScheme) -> ColorScheme {
        match self {
            Theme::Light => ColorScheme::Light,
            Theme::Dark => ColorScheme::Dark,
            Theme::System => platform,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PreferenceError::UnknownTheme(s.to_string()))
    }
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    fn opposite(self) -> ColorScheme {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

/// Key-value persistence for preferences.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in one file.
///
/// The file is re-written on every `set`. A missing or corrupt file reads as
/// empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|s| match serde_json::from_str(&s) {
                Ok(values) => Some(values),
                Err(e) => {
                    tracing::warn!("ignoring unreadable preferences {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_default();
        Self { path, values }
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

type Listener = Box<dyn FnMut(ColorScheme)>;

/// Holds the current theme and notifies listeners when the effective scheme
/// changes.
pub struct ThemeStore<S: PreferenceStorage> {
    storage: S,
    theme: Theme,
    listeners: Vec<Listener>,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Restore the persisted theme. Absent or invalid values mean `System`.
    pub fn load(storage: S) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self {
            storage,
            theme,
            listeners: Vec::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn effective(&self, platform: ColorScheme) -> ColorScheme {
        self.theme.resolve(platform)
    }

    /// Persist an explicit choice and notify listeners with the new effective
    /// scheme.
    pub fn set_theme(
        &mut self,
        theme: Theme,
        platform: ColorScheme,
    ) -> Result<(), PreferenceError> {
        self.storage.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        self.notify(platform);
        Ok(())
    }

    /// Flip the effective scheme, pinning it as an explicit choice.
    pub fn toggle(&mut self, platform: ColorScheme) -> Result<Theme, PreferenceError> {
        let next = match self.effective(platform).opposite() {
            ColorScheme::Light => Theme::Light,
            ColorScheme::Dark => Theme::Dark,
        };
        self.set_theme(next, platform)?;
        Ok(next)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ColorScheme) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The platform reported a new color scheme. Listeners hear about it only
    /// while the theme follows the system.
    pub fn platform_changed(&mut self, platform: ColorScheme) {
        if self.theme == Theme::System {
            self.notify(platform);
        }
    }

    fn notify(&mut self, platform: ColorScheme) {
        let effective = self.effective(platform);
        for listener in &mut self.listeners {
            listener(effective);
        }
    }
}

impl<S: PreferenceStorage + fmt::Debug> fmt::Debug for ThemeStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("storage", &self.storage)
            .field("theme", &self.theme)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
