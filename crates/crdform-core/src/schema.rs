//! Kind descriptors and the Terraform entities derived from them
//!
//! A [`KindSpec`] is the only per-kind input the generic machinery needs:
//! it yields object coordinates, validates metadata, and describes the three
//! Terraform entities exposed for the kind (resource, data source and
//! manifest data source).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coordinate::{ResourceCoordinate, parse_import_id, split_api_version};
use crate::error::{CoreError, Result};
use crate::model::ResourceModel;

/// DNS-1123 subdomain (object names)
static SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid regex")
});

/// DNS-1123 label (namespaces)
static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"));

const MAX_NAME_LENGTH: usize = 253;
const MAX_NAMESPACE_LENGTH: usize = 63;

fn default_true() -> bool {
    true
}

/// Describes one custom resource kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSpec {
    /// API group ("" for the core group)
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Plural resource name used in REST paths
    pub plural: String,
    #[serde(default = "default_true")]
    pub namespaced: bool,
}

impl KindSpec {
    /// Create a namespaced kind
    pub fn namespaced(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
        plural: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            plural: plural.into(),
            namespaced: true,
        }
    }

    /// Create a cluster-scoped kind
    pub fn cluster(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
        plural: impl Into<String>,
    ) -> Self {
        Self {
            namespaced: false,
            ..Self::namespaced(group, version, kind, plural)
        }
    }

    /// Create from an `apiVersion` string
    pub fn from_api_version(
        api_version: &str,
        kind: impl Into<String>,
        plural: impl Into<String>,
        namespaced: bool,
    ) -> Self {
        let (group, version) = split_api_version(api_version);
        Self {
            group,
            version,
            kind: kind.into(),
            plural: plural.into(),
            namespaced,
        }
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Terraform type name: `<provider>_<group>_<kind>_<version>`
    pub fn type_name(&self, provider: &str) -> String {
        let mut parts = vec![provider.to_string()];
        if !self.group.is_empty() {
            parts.push(
                self.group
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                    .collect(),
            );
        }
        parts.push(snake_case(&self.kind));
        parts.push(self.version.clone());
        parts.join("_")
    }

    /// Coordinate of the object with the given namespace and name
    pub fn coordinate(&self, namespace: Option<&str>, name: &str) -> Result<ResourceCoordinate> {
        validate_name(name)?;
        let namespace = match (self.namespaced, namespace) {
            (true, Some(ns)) => {
                validate_namespace(ns)?;
                Some(ns.to_string())
            }
            (true, None) => {
                return Err(CoreError::invalid_model(format!(
                    "{} is namespaced: metadata.namespace is required",
                    self.kind
                )));
            }
            (false, Some(_)) => {
                return Err(CoreError::invalid_model(format!(
                    "{} is cluster-scoped: metadata.namespace must not be set",
                    self.kind
                )));
            }
            (false, None) => None,
        };

        Ok(ResourceCoordinate {
            group: self.group.clone(),
            version: self.version.clone(),
            resource: self.plural.clone(),
            namespace,
            name: name.to_string(),
        })
    }

    /// Coordinate of the object a model describes
    pub fn coordinate_for(&self, model: &ResourceModel) -> Result<ResourceCoordinate> {
        self.coordinate(model.metadata.namespace.as_deref(), &model.metadata.name)
    }

    /// Coordinate from a Terraform import id
    pub fn coordinate_from_import_id(&self, id: &str) -> Result<ResourceCoordinate> {
        let (namespace, name) = parse_import_id(id, self.namespaced)?;
        self.coordinate(namespace.as_deref(), &name)
    }

    /// Fill `apiVersion`/`kind` and validate metadata
    pub fn prepare(&self, model: &mut ResourceModel) -> Result<ResourceCoordinate> {
        model.api_version = self.api_version();
        model.kind = self.kind.clone();
        self.coordinate_for(model)
    }

    /// The Terraform entities exposed for this kind
    pub fn schemas(&self, provider: &str) -> Vec<EntitySchema> {
        let type_name = self.type_name(provider);
        vec![
            EntitySchema {
                type_name: type_name.clone(),
                entity: EntityKind::Resource,
                attributes: resource_attributes(self.namespaced),
            },
            EntitySchema {
                type_name: type_name.clone(),
                entity: EntityKind::DataSource,
                attributes: data_source_attributes(self.namespaced),
            },
            EntitySchema {
                type_name: format!("{}_manifest", type_name),
                entity: EntityKind::Manifest,
                attributes: manifest_attributes(self.namespaced),
            },
        ]
    }
}

/// Kind of Terraform entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Resource,
    DataSource,
    Manifest,
}

/// How an attribute is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
    /// Optional with a provider-supplied default
    OptionalComputed,
}

/// Attribute value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Map,
    /// Kind-specific dynamic document
    Dynamic,
    Object(Vec<AttributeSchema>),
    List(Vec<AttributeSchema>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub name: String,
    pub mode: AttributeMode,
    #[serde(rename = "type")]
    pub ty: AttributeType,
}

impl AttributeSchema {
    fn new(name: &str, mode: AttributeMode, ty: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            mode,
            ty,
        }
    }
}

/// One Terraform entity derived from a kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub type_name: String,
    pub entity: EntityKind,
    pub attributes: Vec<AttributeSchema>,
}

impl EntitySchema {
    /// Look up a top-level attribute
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

fn metadata_attribute(namespaced: bool, computed_extras: bool) -> AttributeSchema {
    use AttributeMode::*;
    let extra_mode = if computed_extras { Computed } else { Optional };
    let mut fields = vec![AttributeSchema::new("name", Required, AttributeType::String)];
    if namespaced {
        fields.push(AttributeSchema::new(
            "namespace",
            Required,
            AttributeType::String,
        ));
    }
    fields.push(AttributeSchema::new("labels", extra_mode, AttributeType::Map));
    fields.push(AttributeSchema::new(
        "annotations",
        extra_mode,
        AttributeType::Map,
    ));
    AttributeSchema::new("metadata", Required, AttributeType::Object(fields))
}

fn resource_attributes(namespaced: bool) -> Vec<AttributeSchema> {
    use AttributeMode::*;
    vec![
        AttributeSchema::new("id", Computed, AttributeType::String),
        AttributeSchema::new("force_conflicts", Optional, AttributeType::Bool),
        AttributeSchema::new("field_manager", Optional, AttributeType::String),
        AttributeSchema::new(
            "wait_for",
            Optional,
            AttributeType::List(vec![
                AttributeSchema::new("jsonpath", Required, AttributeType::String),
                AttributeSchema::new("value", Optional, AttributeType::String),
                AttributeSchema::new("timeout", OptionalComputed, AttributeType::String),
                AttributeSchema::new("poll_interval", OptionalComputed, AttributeType::String),
            ]),
        ),
        AttributeSchema::new(
            "wait_for_delete",
            Optional,
            AttributeType::Object(vec![
                AttributeSchema::new("timeout", OptionalComputed, AttributeType::String),
                AttributeSchema::new("poll_interval", OptionalComputed, AttributeType::String),
            ]),
        ),
        metadata_attribute(namespaced, false),
        AttributeSchema::new("spec", Optional, AttributeType::Dynamic),
    ]
}

fn data_source_attributes(namespaced: bool) -> Vec<AttributeSchema> {
    use AttributeMode::*;
    vec![
        AttributeSchema::new("id", Computed, AttributeType::String),
        metadata_attribute(namespaced, true),
        AttributeSchema::new("spec", Computed, AttributeType::Dynamic),
    ]
}

fn manifest_attributes(namespaced: bool) -> Vec<AttributeSchema> {
    use AttributeMode::*;
    vec![
        AttributeSchema::new("id", Computed, AttributeType::String),
        AttributeSchema::new("yaml", Computed, AttributeType::String),
        metadata_attribute(namespaced, false),
        AttributeSchema::new("spec", Optional, AttributeType::Dynamic),
    ]
}

/// Validate an object name
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CoreError::invalid_model("metadata.name is required"));
    }
    if name.len() > MAX_NAME_LENGTH || !SUBDOMAIN.is_match(name) {
        return Err(CoreError::invalid_model(format!(
            "metadata.name '{}' must be a lowercase RFC 1123 subdomain of at most {} characters",
            name, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validate a namespace name
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.len() > MAX_NAMESPACE_LENGTH || !LABEL.is_match(namespace) {
        return Err(CoreError::invalid_model(format!(
            "metadata.namespace '{}' must be a lowercase RFC 1123 label of at most {} characters",
            namespace, MAX_NAMESPACE_LENGTH
        )));
    }
    Ok(())
}

/// "ClusterIssuer" -> "cluster_issuer", "HTTPRoute" -> "http_route"
fn snake_case(kind: &str) -> String {
    let chars: Vec<char> = kind.chars().collect();
    let mut out = String::with_capacity(kind.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
