//! Transport to the Kubernetes API for a single object
//!
//! [`ApplyClient`] is the seam between the lifecycle/poller logic and the
//! cluster. It performs no retries: a failed request is reported as-is and
//! waiting belongs to the poller.

use async_trait::async_trait;
use kube::{
    Client,
    api::{
        Api, DeleteParams, DynamicObject, Patch, PatchParams, PropagationPolicy,
        ValidationDirective,
    },
    core::GroupVersionKind,
    discovery::ApiResource,
};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crdform_core::{FieldManagerConfig, ResourceCoordinate};

use crate::error::{KubeError, Result};

/// An untyped object as returned by the API server at one instant
pub type ObjectSnapshot = JsonValue;

/// Single-object operations against a cluster
///
/// Implementations must be Send + Sync; independent resources may be
/// operated on concurrently.
#[async_trait]
pub trait ApplyClient: Send + Sync {
    /// Server-side apply `body` to the object at `coordinate`
    ///
    /// Fails with [`KubeError::Conflict`] when another field manager owns a
    /// field and force is disabled.
    async fn apply(
        &self,
        coordinate: &ResourceCoordinate,
        body: &JsonValue,
        field_manager: &FieldManagerConfig,
    ) -> Result<ObjectSnapshot>;

    /// Fetch the object; fails with [`KubeError::NotFound`] when absent
    async fn get(&self, coordinate: &ResourceCoordinate) -> Result<ObjectSnapshot>;

    /// Delete the object; an already absent object counts as deleted
    async fn delete(&self, coordinate: &ResourceCoordinate) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Apply,
    Get,
    Delete,
}

/// [`ApplyClient`] backed by a kube-rs client
#[derive(Clone)]
pub struct KubeApplyClient {
    client: Client,
}

impl KubeApplyClient {
    /// Create a client from the default kubeconfig / in-cluster config
    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default().await?;
        Ok(Self { client })
    }

    /// Create with an existing Kubernetes client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, coordinate: &ResourceCoordinate) -> Api<DynamicObject> {
        // Only group, version and plural are needed to build request paths.
        let gvk = GroupVersionKind::gvk(&coordinate.group, &coordinate.version, "");
        let resource = ApiResource::from_gvk_with_plural(&gvk, &coordinate.resource);
        match &coordinate.namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        }
    }
}

/// Build server-side apply parameters
pub fn apply_params(field_manager: &FieldManagerConfig) -> PatchParams {
    let mut params = PatchParams::apply(&field_manager.field_manager);
    params.force = field_manager.force_conflicts;
    params.field_validation = Some(ValidationDirective::Strict);
    params
}

fn map_error(coordinate: &ResourceCoordinate, verb: Verb, err: kube::Error) -> KubeError {
    match err {
        kube::Error::Api(resp) if resp.code == 404 && verb != Verb::Apply => KubeError::NotFound {
            coordinate: coordinate.clone(),
        },
        kube::Error::Api(resp) if resp.code == 409 && verb == Verb::Apply => KubeError::Conflict {
            coordinate: coordinate.clone(),
            message: resp.message,
        },
        kube::Error::Api(resp) => KubeError::Api {
            status: resp.code,
            message: resp.message,
        },
        other => KubeError::Kube(other),
    }
}

#[async_trait]
impl ApplyClient for KubeApplyClient {
    async fn apply(
        &self,
        coordinate: &ResourceCoordinate,
        body: &JsonValue,
        field_manager: &FieldManagerConfig,
    ) -> Result<ObjectSnapshot> {
        let params = apply_params(field_manager);
        info!(
            path = %coordinate.api_path(),
            field_manager = %field_manager.field_manager,
            force = field_manager.force_conflicts,
            "server-side apply"
        );

        let obj = self
            .api(coordinate)
            .patch(&coordinate.name, &params, &Patch::Apply(body))
            .await
            .map_err(|e| map_error(coordinate, Verb::Apply, e))?;

        Ok(serde_json::to_value(obj)?)
    }

    async fn get(&self, coordinate: &ResourceCoordinate) -> Result<ObjectSnapshot> {
        debug!(path = %coordinate.api_path(), "get");
        let obj = self
            .api(coordinate)
            .get(&coordinate.name)
            .await
            .map_err(|e| map_error(coordinate, Verb::Get, e))?;

        Ok(serde_json::to_value(obj)?)
    }

    async fn delete(&self, coordinate: &ResourceCoordinate) -> Result<()> {
        let params = DeleteParams {
            propagation_policy: Some(PropagationPolicy::Background),
            ..Default::default()
        };

        info!(path = %coordinate.api_path(), "delete");
        match self.api(coordinate).delete(&coordinate.name, &params).await {
            Ok(_) => Ok(()),
            Err(e) => match map_error(coordinate, Verb::Delete, e) {
                KubeError::NotFound { .. } => {
                    debug!(path = %coordinate.api_path(), "already absent");
                    Ok(())
                }
                other => Err(other),
            },
        }
    }
}
