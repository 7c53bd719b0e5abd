//! Resource files and kind arguments
//!
//! A resource file is the YAML equivalent of one Terraform resource block,
//! plus the kind descriptor the provider would otherwise generate. State
//! printed by cluster commands uses the same format so it can be fed back
//! into `update`, `read` and `delete`.

use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;

use crdform_core::{KindSpec, ObjectMetadata, ResourceModel, WaitForDelete, WaitForUpsert};

use crate::error::{CliError, Result};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceFile {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub plural: String,
    #[serde(default = "default_true")]
    pub namespaced: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub metadata: ObjectMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<JsonValue>,

    #[serde(default, alias = "wait_for_upsert", skip_serializing_if = "Vec::is_empty")]
    pub wait_for: Vec<WaitForUpsert>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_delete: Option<WaitForDelete>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
}

impl ResourceFile {
    /// Load a resource file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            CliError::input_with_help(
                format!("{}: {}", path.display(), e),
                "a resource file needs apiVersion, kind, plural and metadata",
            )
        })
    }

    pub fn kind_spec(&self) -> KindSpec {
        KindSpec::from_api_version(
            &self.api_version,
            self.kind.clone(),
            self.plural.clone(),
            self.namespaced,
        )
    }

    pub fn into_model(self) -> ResourceModel {
        ResourceModel {
            api_version: self.api_version,
            kind: self.kind,
            metadata: self.metadata,
            spec: self.spec,
            id: self.id,
            yaml: None,
            wait_for: self.wait_for,
            wait_for_delete: self.wait_for_delete,
            force_conflicts: self.force_conflicts,
            field_manager: self.field_manager,
        }
    }

    /// State file for a model of the given kind
    pub fn from_model(kind: &KindSpec, model: ResourceModel) -> Self {
        Self {
            api_version: kind.api_version(),
            kind: kind.kind.clone(),
            plural: kind.plural.clone(),
            namespaced: kind.namespaced,
            id: model.id,
            metadata: model.metadata,
            spec: model.spec,
            wait_for: model.wait_for,
            wait_for_delete: model.wait_for_delete,
            force_conflicts: model.force_conflicts,
            field_manager: model.field_manager,
        }
    }
}

/// Identifies a kind on the command line
#[derive(Args, Debug, Clone)]
pub struct KindArgs {
    /// API version of the kind (group/version, or version for the core group)
    #[arg(long)]
    pub api_version: String,

    /// Kind name (e.g. Certificate)
    #[arg(long)]
    pub kind: String,

    /// Plural resource name used in API paths (e.g. certificates)
    #[arg(long)]
    pub plural: String,

    /// The kind is cluster-scoped
    #[arg(long)]
    pub cluster_scoped: bool,
}

impl KindArgs {
    pub fn kind_spec(&self) -> KindSpec {
        KindSpec::from_api_version(
            &self.api_version,
            self.kind.clone(),
            self.plural.clone(),
            !self.cluster_scoped,
        )
    }
}
