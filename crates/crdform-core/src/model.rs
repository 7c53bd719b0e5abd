//! The typed model shared by every custom resource kind
//!
//! Each kind exposes the same outer shape: Kubernetes fields (`apiVersion`,
//! `kind`, `metadata`, `spec`) that are projected to JSON, and Terraform-only
//! bookkeeping fields that never leave the provider. The per-kind `spec`
//! schema is carried as a dynamic JSON value.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::wait::{WaitForDelete, WaitForUpsert};

/// The subset of `metadata` managed through configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// Object name
    #[serde(default)]
    pub name: String,

    /// Object namespace (absent for cluster-scoped kinds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl ObjectMetadata {
    /// Metadata for a namespaced object
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    /// Metadata for a cluster-scoped object
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Configuration and state of one custom resource
///
/// Fields marked `#[serde(skip)]` are Terraform bookkeeping and are not part
/// of the Kubernetes object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceModel {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMetadata,

    #[serde(default, skip_serializing_if = "spec_is_empty")]
    pub spec: Option<JsonValue>,

    /// Terraform identity (`namespace/name` or `name`)
    #[serde(skip)]
    pub id: Option<String>,

    /// Rendered manifest (manifest data sources only)
    #[serde(skip)]
    pub yaml: Option<String>,

    #[serde(skip)]
    pub wait_for: Vec<WaitForUpsert>,

    #[serde(skip)]
    pub wait_for_delete: Option<WaitForDelete>,

    #[serde(skip)]
    pub force_conflicts: Option<bool>,

    #[serde(skip)]
    pub field_manager: Option<String>,
}

fn spec_is_empty(spec: &Option<JsonValue>) -> bool {
    matches!(spec, None | Some(JsonValue::Null))
}

impl ResourceModel {
    /// Create a model with metadata and spec
    pub fn new(metadata: ObjectMetadata, spec: Option<JsonValue>) -> Self {
        Self {
            metadata,
            spec,
            ..Default::default()
        }
    }

    /// Add an upsert wait condition
    pub fn with_wait_for(mut self, wait: WaitForUpsert) -> Self {
        self.wait_for.push(wait);
        self
    }

    /// Set the delete wait condition
    pub fn with_wait_for_delete(mut self, wait: WaitForDelete) -> Self {
        self.wait_for_delete = Some(wait);
        self
    }

    /// Copy bookkeeping fields from another model
    ///
    /// Used when state is rebuilt from a cluster response: the response knows
    /// nothing about wait conditions or field-manager overrides.
    pub fn carry_bookkeeping_from(&mut self, other: &ResourceModel) {
        self.id = other.id.clone();
        self.yaml = other.yaml.clone();
        self.wait_for = other.wait_for.clone();
        self.wait_for_delete = other.wait_for_delete.clone();
        self.force_conflicts = other.force_conflicts;
        self.field_manager = other.field_manager.clone();
    }
}
