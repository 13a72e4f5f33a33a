//! Site configuration module.
//!
//! Handles loading and validating the optional `site.toml` at the site
//! root. Everything has a stock default, so a bare checkout works without
//! any config file:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_dir = "contents"        # Route tables, versions.json, page bodies
//! locales_dir = "locales"         # UI-string dictionaries, one dir per locale
//! default_locale = "en"           # Canonical locale unknown aliases map to
//! base_url = "https://bnlang.dev" # Absolute URL prefix for printed paths
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
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

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding route tables, the version manifest, and page
    /// content, relative to the site root.
    pub content_dir: String,
    /// Directory holding per-locale UI-string dictionaries.
    pub locales_dir: String,
    /// Canonical locale that unknown locale aliases resolve to.
    pub default_locale: String,
    /// Absolute URL prefix used when printing full page URLs.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "contents".to_string(),
            locales_dir: "locales".to_string(),
            default_locale: "en".to_string(),
            base_url: "https://bnlang.dev".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load `site.toml` from the site root, falling back to stock
    /// defaults when the file doesn't exist.
    pub fn load(site_root: &Path) -> Result<Self, ConfigError> {
        let path = site_root.join("site.toml");
        let config = if path.is_file() {
            let raw = fs::read_to_string(&path)?;
            toml::from_str(&raw)?
        } else {
            SiteConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values the rest of the pipeline assumes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.default_locale.as_str(), "en" | "bn" | "banglish") {
            return Err(ConfigError::Validation(format!(
                "default_locale must be one of en, bn, banglish (got \"{}\")",
                self.default_locale
            )));
        }
        if self.content_dir.is_empty() {
            return Err(ConfigError::Validation("content_dir must not be empty".into()));
        }
        if self.locales_dir.is_empty() {
            return Err(ConfigError::Validation("locales_dir must not be empty".into()));
        }
        Ok(())
    }

    pub fn content_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.content_dir)
    }

    pub fn locales_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.locales_dir)
    }
}
