//! crdform Core - Core types for managing Kubernetes custom resources
//!
//! This crate provides the cluster-independent pieces:
//! - `model`: The typed model shared by every custom resource kind
//! - `projection`: Model <-> JSON/YAML projection
//! - `manifest`: Offline manifest rendering
//! - `jsonpath`: Restricted path evaluation for wait conditions
//! - `wait`: Wait condition blocks and duration parsing
//! - `schema`: Kind descriptors and the Terraform entities they expose
//! - `coordinate`: Object coordinates and import ids
//! - `config`: Provider configuration and field-manager resolution
//! - `diagnostics`: User-facing diagnostics

pub mod config;
pub mod coordinate;
pub mod diagnostics;
pub mod error;
pub mod jsonpath;
pub mod manifest;
pub mod model;
pub mod projection;
pub mod schema;
pub mod wait;

pub use config::{FieldManagerConfig, ProviderConfig};
pub use coordinate::{ResourceCoordinate, parse_import_id, split_api_version};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{CoreError, Result};
pub use jsonpath::{JsonPath, PathMatch};
pub use manifest::render_manifest;
pub use model::{ObjectMetadata, ResourceModel};
pub use schema::{AttributeMode, AttributeSchema, AttributeType, EntityKind, EntitySchema, KindSpec};
pub use wait::{DeleteWait, WaitCondition, WaitForDelete, WaitForUpsert, WaitTimeout};
