//! Configuration management for Kiln.
//!
//! Parses a project's `config.toml` with serde and locates project
//! directories relative to the working directory.
//!
//! ## File format
//!
//! ```toml
//! domain = "example.com"
//! theme = "default"
//! https = "on"    # on | off
//! pretty = "off"  # on | off
//! ```
//!
//! The loaded [`SiteConfig`] is immutable and shared read-only by every
//! build stage.

mod project;

pub use project::Project;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename inside a project directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// An `on`/`off` switch as written in `config.toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    On,
    #[default]
    Off,
}

impl Toggle {
    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Host used for absolute sitemap URLs (e.g. `example.com`).
    pub domain: String,
    /// Subfolder of `theme/` holding the templates in use.
    pub theme: String,
    /// Emit `https://` URLs in the sitemap.
    pub https: Toggle,
    /// Emit pages as `<name>/index.html`.
    pub pretty: Toggle,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Project directory not found.
    #[error("Project directory does not exist: {}", .0.display())]
    ProjectNotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("Cannot parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl SiteConfig {
    /// Load the configuration of a located project.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the project has no `config.toml`,
    /// `ConfigError::Parse` if it is malformed and `ConfigError::Validation`
    /// if required fields are empty.
    pub fn load(project: &Project) -> Result<Self, ConfigError> {
        let path = project.config_path();
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        Self::load_from_file(&path)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(
            path = %path.display(),
            domain = %config.domain,
            theme = %config.theme,
            "Loaded site configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration from TOML source.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.domain, "domain")?;
        require_non_empty(&self.theme, "theme")?;
        Ok(())
    }

    /// URL scheme prefix for absolute links.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.https.is_on() {
            "https://"
        } else {
            "http://"
        }
    }
}
