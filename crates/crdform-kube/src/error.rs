//! Error types for crdform-kube

use std::time::Duration;

use crdform_core::{CoreError, ResourceCoordinate};
use thiserror::Error;

/// Result type for crdform-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur during cluster operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Projection between model and JSON/YAML failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The cluster rejected the request
    #[error("Kubernetes API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Server-side apply reported field ownership conflicts
    #[error("apply conflict on {coordinate}: {message}\nHint: set force_conflicts = true to take ownership, or inspect metadata.managedFields to find the other field manager")]
    Conflict {
        coordinate: ResourceCoordinate,
        message: String,
    },

    /// The object does not exist
    #[error("{coordinate} not found")]
    NotFound { coordinate: ResourceCoordinate },

    /// A wait condition was not met in time
    #[error("condition '{condition}' not met within {elapsed:?}")]
    Timeout { condition: String, elapsed: Duration },

    /// Invalid configuration or input
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport or client error
    #[error("Kubernetes client error: {0}")]
    Kube(#[from] kube::Error),
}

impl From<CoreError> for KubeError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Serialization { message } => KubeError::Serialization(message),
            other => KubeError::InvalidConfig(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for KubeError {
    fn from(e: serde_json::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl KubeError {
    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        match self {
            KubeError::NotFound { .. } => true,
            KubeError::Api { status, .. } => *status == 404,
            KubeError::Kube(kube::Error::Api(resp)) => resp.code == 404,
            _ => false,
        }
    }

    /// Check if this is an apply conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, KubeError::Conflict { .. })
    }

    /// Short summary used for diagnostics
    pub fn summary(&self) -> &'static str {
        match self {
            KubeError::Serialization(_) => "Failed to project resource",
            KubeError::Api { .. } | KubeError::Kube(_) => "Kubernetes API request failed",
            KubeError::Conflict { .. } => "Server-side apply conflict",
            KubeError::NotFound { .. } => "Resource not found",
            KubeError::Timeout { .. } => "Wait condition not met",
            KubeError::InvalidConfig(_) => "Invalid configuration",
        }
    }
}
