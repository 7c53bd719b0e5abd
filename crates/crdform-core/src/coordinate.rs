//! Object coordinates: the (group, version, resource, namespace, name) tuple
//! that addresses exactly one object in a cluster.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Identifies one Kubernetes object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceCoordinate {
    /// API group ("" for the core group)
    pub group: String,
    /// API version
    pub version: String,
    /// Plural resource name (e.g. "certificates")
    pub resource: String,
    /// Namespace (None for cluster-scoped kinds)
    pub namespace: Option<String>,
    /// Object name
    pub name: String,
}

impl ResourceCoordinate {
    /// Create a coordinate for a namespaced object
    pub fn namespaced(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Create a coordinate for a cluster-scoped object
    pub fn cluster(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
            namespace: None,
            name: name.into(),
        }
    }

    /// The `apiVersion` string for this coordinate ("v1" or "group/version")
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// The REST path of the object on the API server
    pub fn api_path(&self) -> String {
        let prefix = if self.group.is_empty() {
            format!("/api/{}", self.version)
        } else {
            format!("/apis/{}/{}", self.group, self.version)
        };
        match &self.namespace {
            Some(ns) => format!(
                "{}/namespaces/{}/{}/{}",
                prefix, ns, self.resource, self.name
            ),
            None => format!("{}/{}/{}", prefix, self.resource, self.name),
        }
    }

    /// Terraform identity: `namespace/name` or `name`
    pub fn id(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for ResourceCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.api_version(), self.resource, self.id())
    }
}

/// Split an `apiVersion` into (group, version)
///
/// - "apps/v1" -> ("apps", "v1")
/// - "v1" -> ("", "v1")
pub fn split_api_version(api_version: &str) -> (String, String) {
    match api_version.rsplit_once('/') {
        Some((g, v)) => (g.to_string(), v.to_string()),
        None => (String::new(), api_version.to_string()),
    }
}

/// Parse a Terraform import id into (namespace, name)
///
/// Namespaced kinds require `namespace/name`, cluster-scoped kinds require
/// a bare `name`.
pub fn parse_import_id(id: &str, namespaced: bool) -> Result<(Option<String>, String)> {
    let invalid = |message: &str| CoreError::InvalidImportId {
        id: id.to_string(),
        message: message.to_string(),
    };

    let parts: Vec<&str> = id.split('/').collect();
    if namespaced {
        match parts.as_slice() {
            [ns, name] if !ns.is_empty() && !name.is_empty() => {
                Ok((Some(ns.to_string()), name.to_string()))
            }
            _ => Err(invalid("expected the format 'namespace/name'")),
        }
    } else {
        match parts.as_slice() {
            [name] if !name.is_empty() => Ok((None, name.to_string())),
            _ => Err(invalid("expected the format 'name'")),
        }
    }
}
