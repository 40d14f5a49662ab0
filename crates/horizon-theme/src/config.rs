//! Engine configuration.
//!
//! All conventions the engine relies on (cache bounds, font file suffixes,
//! provider naming) are collected in [`ThemeConfig`]. Configurations can be
//! built in code or loaded from TOML:
//!
//! ```
//! use horizon_theme::ThemeConfig;
//!
//! let config = ThemeConfig::from_toml_str(r#"
//!     cache_capacity = 32
//!     font_extensions = [".otf"]
//! "#).unwrap();
//!
//! assert_eq!(config.cache_capacity, 32);
//! assert_eq!(config.theme_action_suffix, ".THEME");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// Configuration for a [`ThemeEngine`](crate::ThemeEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Maximum entries per bounded kind cache (drawable, color, color state).
    /// Default: 100.
    pub cache_capacity: usize,
    /// Suffixes tried, in order, when looking for font files.
    /// Default: `.ttf`, `.otf`.
    pub font_extensions: Vec<String>,
    /// Directory where fonts served by a theme's file provider are written
    /// before loading.
    /// Default: system temp directory / "horizon-theme-fonts".
    pub font_cache_dir: PathBuf,
    /// Suffix appended to a package id to form the theme-provider action.
    /// Default: `.THEME`.
    pub theme_action_suffix: String,
    /// Suffix appended to a theme package id to form its file-provider
    /// authority.
    /// Default: `.FileProvider`.
    pub file_provider_suffix: String,
    /// Scheme used when rendering sound resource URIs.
    /// Default: `android.resource`.
    pub resource_uri_scheme: String,
    /// Name of the font slot used by `default_font` and `set_font`.
    /// Default: `font`.
    pub default_font_name: String,
    /// String resource naming the theme's host style.
    /// Default: `app_theme`.
    pub theme_string: String,
    /// String resource naming the theme's settings-screen host style.
    /// Default: `app_settings_theme`.
    pub settings_theme_string: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 100,
            font_extensions: vec![".ttf".to_string(), ".otf".to_string()],
            font_cache_dir: std::env::temp_dir().join("horizon-theme-fonts"),
            theme_action_suffix: ".THEME".to_string(),
            file_provider_suffix: ".FileProvider".to_string(),
            resource_uri_scheme: "android.resource".to_string(),
            default_font_name: "font".to_string(),
            theme_string: "app_theme".to_string(),
            settings_theme_string: "app_settings_theme".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ThemeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ThemeError::Config(e.to_string()))
    }

    /// Check invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(ThemeError::Config(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if self.default_font_name.is_empty() {
            return Err(ThemeError::Config(
                "default_font_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the per-kind cache bound.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the font file suffixes.
    #[must_use]
    pub fn with_font_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the font materialization directory.
    #[must_use]
    pub fn with_font_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_cache_dir = dir.into();
        self
    }

    /// Set the sound URI scheme.
    #[must_use]
    pub fn with_resource_uri_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.resource_uri_scheme = scheme.into();
        self
    }

    /// The action a theme provider for `package_id` responds to.
    pub fn theme_action(&self, package_id: &str) -> String {
        format!("{package_id}{}", self.theme_action_suffix)
    }

    /// The content URI a theme package serves `file_name` under.
    pub fn content_uri(&self, package_id: &str, file_name: &str) -> String {
        format!(
            "content://{package_id}{}/{file_name}",
            self.file_provider_suffix
        )
    }
}
