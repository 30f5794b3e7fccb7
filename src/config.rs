//! Site configuration module.
//!
//! Handles loading and validating the optional `site.toml` next to the
//! content data. Configuration is sparse: every field has a default matching
//! the site this generator was originally built for, and a config file only
//! needs to override the values it cares about.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://www.xedur.com"          # URL prefix for the sitemap
//! categories = ["games", "solar2d", "other"]  # Frontpage sections, in order
//! site_name = "XeduR"                         # Page title / og:site_name
//! default_keywords = "..."                    # Fallback meta keywords
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site-wide settings loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute URL prefix for sitemap `<loc>` entries and OG urls.
    pub base_url: String,
    /// Content categories in frontpage display order. Each category maps to
    /// a `<name>.json` data file and a `{{<name>}}` frontpage token.
    pub categories: Vec<String>,
    /// Site name used in page titles and `og:site_name`.
    pub site_name: String,
    /// Meta keywords used when a page defines none of its own.
    pub default_keywords: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.xedur.com".to_string(),
            categories: vec![
                "games".to_string(),
                "solar2d".to_string(),
                "other".to_string(),
            ],
            site_name: "XeduR".to_string(),
            default_keywords: "Eetu Rantanen, XeduR, Solar2D, Lua, gamedev, \
                               game development, open source, code portfolio"
                .to_string(),
        }
    }
}

/// Load `site.toml` from `path`, falling back to defaults when absent.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SiteConfig::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(toml::from_str(&content)?)
}
