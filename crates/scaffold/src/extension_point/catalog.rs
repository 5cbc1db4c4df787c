//! Catalog of known extension points, loaded from YAML.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use super::{ExtensionPoint, SdkLanguage};
use crate::error::{ScaffoldError, ScaffoldResult};

/// Extension points shipped with the binary.
const EMBEDDED_EXTENSION_POINTS: &str = include_str!("../../config/extension_points.yml");

/// All extension points, keyed by type.
#[derive(Debug, Clone, Default)]
pub struct ExtensionPointCatalog {
    extension_points: BTreeMap<String, ExtensionPoint>,
}

impl ExtensionPointCatalog {
    /// The catalog bundled with the binary.
    pub fn embedded() -> ScaffoldResult<Self> {
        Self::from_yaml_str(EMBEDDED_EXTENSION_POINTS)
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: &Path) -> ScaffoldResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Config(format!(
                "Failed to read extension points from {}: {e}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "Loaded extension point catalog");
        Self::from_yaml_str(&contents)
    }

    /// Parse a YAML mapping of `type -> config`.
    pub fn from_yaml_str(yaml: &str) -> ScaffoldResult<Self> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let Value::Mapping(entries) = root else {
            return Err(ScaffoldError::Config(
                "Extension point catalog must be a mapping of type to config".to_string(),
            ));
        };

        let extension_points = entries
            .iter()
            .filter_map(|(key, config)| {
                let extension_type = key.as_str()?;
                Some((
                    extension_type.to_string(),
                    ExtensionPoint::new(extension_type, config),
                ))
            })
            .collect();

        Ok(Self { extension_points })
    }

    /// Look up an extension point; dashed and underscored spellings both match.
    pub fn get(&self, extension_type: &str) -> Option<&ExtensionPoint> {
        self.extension_points.get(&normalize_type(extension_type))
    }

    /// Types that can be used for new projects, sorted.
    pub fn types(&self) -> Vec<&str> {
        self.extension_points
            .values()
            .filter(|ep| ep.is_available())
            .map(ExtensionPoint::extension_type)
            .collect()
    }

    pub fn deprecated_types(&self) -> Vec<&str> {
        self.extension_points
            .values()
            .filter(|ep| ep.is_deprecated())
            .map(ExtensionPoint::extension_type)
            .collect()
    }

    /// Languages an extension point has an SDK for. Empty if the type is unknown.
    pub fn languages(&self, extension_type: &str) -> Vec<SdkLanguage> {
        self.get(extension_type)
            .map(|ep| ep.sdks().languages())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.extension_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extension_points.is_empty()
    }
}

fn normalize_type(extension_type: &str) -> String {
    extension_type.trim().to_lowercase().replace('-', "_")
}
