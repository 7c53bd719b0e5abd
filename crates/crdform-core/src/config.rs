//! Provider configuration
//!
//! Stored in `~/.config/crdform/config.yaml`. Every resource operation
//! receives an immutable reference to one [`ProviderConfig`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::model::ResourceModel;

/// Field manager used when neither the provider nor the resource names one
pub const DEFAULT_FIELD_MANAGER: &str = "crdform";

/// Prefix of Terraform type names
pub const DEFAULT_PROVIDER_NAME: &str = "k8s";

fn default_field_manager() -> String {
    DEFAULT_FIELD_MANAGER.to_string()
}

fn default_provider_name() -> String {
    DEFAULT_PROVIDER_NAME.to_string()
}

/// Provider-level defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default = "default_field_manager")]
    pub field_manager: String,

    #[serde(default)]
    pub force_conflicts: bool,

    /// Only manifest rendering is available when offline
    #[serde(default)]
    pub offline: bool,

    #[serde(default = "default_provider_name")]
    pub provider_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            field_manager: default_field_manager(),
            force_conflicts: false,
            offline: false,
            provider_name: default_provider_name(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| CoreError::Config {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("crdform").join("config.yaml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_manager.trim().is_empty() {
            return Err(CoreError::Config {
                message: "fieldManager must not be empty".to_string(),
            });
        }
        if self.provider_name.trim().is_empty() {
            return Err(CoreError::Config {
                message: "providerName must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Apply parameters for a resource, honoring its overrides
    pub fn field_manager_for(&self, model: &ResourceModel) -> FieldManagerConfig {
        FieldManagerConfig::resolve(
            self,
            model.field_manager.as_deref(),
            model.force_conflicts,
        )
    }
}

/// Server-side apply parameters threaded into every apply call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldManagerConfig {
    pub field_manager: String,
    pub force_conflicts: bool,
}

impl FieldManagerConfig {
    pub fn new(field_manager: impl Into<String>, force_conflicts: bool) -> Self {
        Self {
            field_manager: field_manager.into(),
            force_conflicts,
        }
    }

    /// Per-resource overrides win over provider defaults
    pub fn resolve(
        defaults: &ProviderConfig,
        field_manager: Option<&str>,
        force_conflicts: Option<bool>,
    ) -> Self {
        let field_manager = field_manager
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(defaults.field_manager.as_str());
        Self {
            field_manager: field_manager.to_string(),
            force_conflicts: force_conflicts.unwrap_or(defaults.force_conflicts),
        }
    }
}
