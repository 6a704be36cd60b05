//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root; stock defaults are overridden by whatever keys it sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Mutter's Blog"
//! author = "Mutter"
//! base_url = ""             # Absolute site URL, used for canonical links
//! locales = ["zh", "en"]    # Supported locales, each gets a /{locale}/ tree
//! default_locale = "zh"     # Target of the root redirect
//!
//! [content]
//! posts_dir = "posts"       # Markdown posts, relative to the content root
//! assets_dir = "assets"     # Copied verbatim to the output root
//! words_per_minute = 200    # Reading-time speed
//!
//! [github]
//! username = "Mutter45"
//! api_base = "https://api.github.com"
//! per_page = 100            # Events requested from the feed
//! max_commits = 50          # Commits kept after flattening push events
//! revalidate_secs = 3600    # Cache hint sent with the request
//! timeout_secs = 10
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! link = "#333333"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! link_hover = "#ffffff"
//!
//! [processing]
//! max_processes = 4         # Max parallel page renderers (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub content: ContentConfig,
    pub github: GithubConfig,
    pub colors: ColorConfig,
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.locales.is_empty() {
            return Err(ConfigError::Validation(
                "site.locales must not be empty".into(),
            ));
        }
        if !self.site.locales.contains(&self.site.default_locale) {
            return Err(ConfigError::Validation(format!(
                "site.default_locale '{}' is not listed in site.locales",
                self.site.default_locale
            )));
        }
        if self.content.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "content.words_per_minute must be non-zero".into(),
            ));
        }
        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(ConfigError::Validation(
                "github.per_page must be 1-100".into(),
            ));
        }
        if self.github.username.trim().is_empty() {
            return Err(ConfigError::Validation(
                "github.username must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity and locale routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub author: String,
    /// Absolute URL without trailing slash; empty means relative links only.
    pub base_url: String,
    pub locales: Vec<Locale>,
    pub default_locale: Locale,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Mutter's Blog".to_string(),
            author: "Mutter".to_string(),
            base_url: String::new(),
            locales: vec![Locale::Zh, Locale::En],
            default_locale: Locale::Zh,
        }
    }
}

/// Where posts and assets live inside the content root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub posts_dir: String,
    pub assets_dir: String,
    pub words_per_minute: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            assets_dir: "assets".to_string(),
            words_per_minute: 200,
        }
    }
}

/// Public activity feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    pub username: String,
    pub api_base: String,
    pub per_page: u32,
    pub max_commits: usize,
    /// Sent as `Cache-Control: max-age` on the feed request.
    pub revalidate_secs: u64,
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: "Mutter45".to_string(),
            api_base: "https://api.github.com".to_string(),
            per_page: 100,
            max_commits: 50,
            revalidate_secs: 3600,
            timeout_secs: 10,
        }
    }
}

impl GithubConfig {
    /// Public profile URL, linked from the home and commits pages.
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.username)
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renderers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never less than one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: dates, reading time, tags.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            link_hover: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity and locales
# ---------------------------------------------------------------------------
[site]
title = "Mutter's Blog"
author = "Mutter"

# Absolute site URL without a trailing slash. Leave empty for relative links.
base_url = ""

# Every locale gets its own /{locale}/ page tree.
locales = ["zh", "en"]

# The site root redirects here.
default_locale = "zh"

# ---------------------------------------------------------------------------
# Content layout
# ---------------------------------------------------------------------------
[content]
# Directory of <slug>.md posts, relative to the content root.
posts_dir = "posts"

# Copied verbatim to the output root (favicon, images, fonts).
assets_dir = "assets"

# Reading time = ceil(words / words_per_minute).
words_per_minute = 200

# ---------------------------------------------------------------------------
# Commit activity feed
# ---------------------------------------------------------------------------
[github]
username = "Mutter45"
api_base = "https://api.github.com"

# Events requested in the single feed page (1-100).
per_page = 100

# Commits kept after flattening push events.
max_commits = 50

# Cache hint sent with the request, in seconds.
revalidate_secs = 3600

# Request timeout, in seconds. A slow feed yields an empty commits page.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Dates, reading time, tags
border = "#e0e0e0"
link = "#333333"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

fn color_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Generate CSS custom properties from color config.
///
/// An explicit `data-theme` on `<html>` wins; without one the platform's
/// `prefers-color-scheme` decides.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

:root[data-theme="dark"] {{
{dark}
}}

@media (prefers-color-scheme: dark) {{
    :root:not([data-theme="light"]) {{
{dark_nested}
    }}
}}"#,
        light = color_vars(&colors.light, "    "),
        dark = color_vars(&colors.dark, "    "),
        dark_nested = color_vars(&colors.dark, "        "),
    )
}
