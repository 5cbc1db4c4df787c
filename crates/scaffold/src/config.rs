//! CLI configuration.
//!
//! Settings come from three layers, later ones winning: the TOML config file,
//! environment variables, and command-line flags. The last two are merged by
//! clap before [`ScaffoldConfig::with_overrides`] is applied.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::extension_point::ExtensionPointCatalog;
use crate::partners::DEFAULT_PARTNERS_URL;

/// Extension types offered when the config file does not list any.
pub const DEFAULT_EXTENSION_TYPES: [&str; 3] = [
    "CHECKOUT_POST_PURCHASE",
    "PRODUCT_SUBSCRIPTION",
    "THEME_APP_EXTENSION",
];

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScaffoldConfig {
    /// Partners API host.
    pub partners_url: Option<String>,
    /// Bearer token for the Partners API.
    pub token: Option<String>,
    /// YAML file replacing the bundled extension point catalog.
    pub extension_points: Option<PathBuf>,
    /// Extension types offered by `create extension`.
    pub extension_types: Vec<String>,
}

impl ScaffoldConfig {
    /// `<config dir>/scaffold/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scaffold").join("config.toml"))
    }

    /// Load a config file.
    pub fn load(path: &Path) -> ScaffoldResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load an explicitly named file, or the default file if it exists.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn discover(explicit: Option<&Path>) -> ScaffoldResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply values from flags or environment variables.
    pub fn with_overrides(
        mut self,
        partners_url: Option<String>,
        token: Option<String>,
        extension_points: Option<PathBuf>,
    ) -> Self {
        if partners_url.is_some() {
            self.partners_url = partners_url;
        }
        if token.is_some() {
            self.token = token;
        }
        if extension_points.is_some() {
            self.extension_points = extension_points;
        }
        self
    }

    pub fn partners_url(&self) -> &str {
        self.partners_url.as_deref().unwrap_or(DEFAULT_PARTNERS_URL)
    }

    pub fn extension_types(&self) -> Vec<String> {
        if self.extension_types.is_empty() {
            DEFAULT_EXTENSION_TYPES.iter().map(ToString::to_string).collect()
        } else {
            self.extension_types.clone()
        }
    }

    /// The configured extension point catalog, or the bundled one.
    pub fn catalog(&self) -> ScaffoldResult<ExtensionPointCatalog> {
        match &self.extension_points {
            Some(path) => ExtensionPointCatalog::load(path),
            None => ExtensionPointCatalog::embedded(),
        }
    }
}
