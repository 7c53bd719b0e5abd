//! Create, read, update, delete and import for one custom resource kind
//!
//! [`ResourceLifecycle`] strings the pieces together: the model is projected
//! to JSON, applied server-side, projected back, then polled until its wait
//! conditions hold. Errors never escape as `Err`; they become diagnostics
//! next to whatever state could be recorded.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crdform_core::{
    Diagnostic, Diagnostics, KindSpec, ProviderConfig, ResourceCoordinate, ResourceModel,
    WaitCondition, projection,
};

use crate::client::{ApplyClient, ObjectSnapshot};
use crate::error::{KubeError, Result};
use crate::poller::{ConditionPoller, PollOutcome};

/// Resource operation, used to prefix diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.write_str("Create"),
            Operation::Read => f.write_str("Read"),
            Operation::Update => f.write_str("Update"),
            Operation::Delete => f.write_str("Delete"),
            Operation::Import => f.write_str("Import"),
        }
    }
}

/// State to record plus diagnostics for the user
///
/// `state` is `None` when the resource should be removed from (or never
/// enter) Terraform state.
#[derive(Debug, Clone, Default)]
pub struct OperationResult {
    pub state: Option<ResourceModel>,
    pub diagnostics: Diagnostics,
}

impl OperationResult {
    fn with_state(state: ResourceModel, diagnostics: Diagnostics) -> Self {
        Self {
            state: Some(state),
            diagnostics,
        }
    }

    fn failed(operation: Operation, err: &KubeError) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(error_diagnostic(operation, err));
        Self {
            state: None,
            diagnostics,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

pub(crate) fn error_diagnostic(operation: Operation, err: &KubeError) -> Diagnostic {
    Diagnostic::error(err.summary(), err.to_string()).prefixed(&operation.to_string())
}

fn timeout_diagnostic(operation: Operation, err: &KubeError, last_value: Option<&str>) -> Diagnostic {
    let detail = match last_value {
        Some(value) => format!(
            "{}; last observed value: {:?}. The applied object was left in place.",
            err, value
        ),
        None => format!("{}. The applied object was left in place.", err),
    };
    Diagnostic::warning(err.summary(), detail).prefixed(&operation.to_string())
}

/// Rebuild a model from a cluster object, keeping the bookkeeping of `prior`
pub(crate) fn state_from_snapshot(
    snapshot: ObjectSnapshot,
    prior: &ResourceModel,
) -> Result<ResourceModel> {
    let mut state = projection::from_value(snapshot)?;
    state.carry_bookkeeping_from(prior);
    Ok(state)
}

pub(crate) fn ensure_online(config: &ProviderConfig) -> Result<()> {
    if config.offline {
        return Err(KubeError::InvalidConfig(
            "provider is configured offline".to_string(),
        ));
    }
    Ok(())
}

/// Lifecycle operations for one kind
pub struct ResourceLifecycle<C: ApplyClient> {
    client: C,
    config: Arc<ProviderConfig>,
    kind: KindSpec,
}

impl<C: ApplyClient> ResourceLifecycle<C> {
    pub fn new(client: C, config: Arc<ProviderConfig>, kind: KindSpec) -> Self {
        Self {
            client,
            config,
            kind,
        }
    }

    /// Apply a planned resource and wait for its conditions
    pub async fn create(&self, plan: ResourceModel) -> OperationResult {
        self.upsert(plan, Operation::Create).await
    }

    /// Re-apply a resource; name and namespace must not change
    pub async fn update(&self, prior: &ResourceModel, mut plan: ResourceModel) -> OperationResult {
        let moved = match (
            self.kind.coordinate_for(prior),
            self.kind.coordinate_for(&plan),
        ) {
            (Ok(old), Ok(new)) => old != new,
            _ => false,
        };
        if moved {
            let err = KubeError::InvalidConfig(
                "metadata.name and metadata.namespace cannot change in place; the resource must be replaced".to_string(),
            );
            return OperationResult::failed(Operation::Update, &err);
        }

        plan.id = prior.id.clone();
        self.upsert(plan, Operation::Update).await
    }

    /// Refresh state from the cluster
    ///
    /// A missing object yields no state so Terraform plans a re-create.
    pub async fn read(&self, state: &ResourceModel) -> OperationResult {
        match self.try_read(state).await {
            Ok(state) => OperationResult {
                state,
                diagnostics: Diagnostics::new(),
            },
            Err(e) => OperationResult::failed(Operation::Read, &e),
        }
    }

    async fn try_read(&self, state: &ResourceModel) -> Result<Option<ResourceModel>> {
        ensure_online(&self.config)?;
        let coordinate = self.kind.coordinate_for(state)?;
        match self.client.get(&coordinate).await {
            Ok(snapshot) => {
                let mut refreshed = state_from_snapshot(snapshot, state)?;
                refreshed.id.get_or_insert_with(|| coordinate.id());
                Ok(Some(refreshed))
            }
            Err(e) if e.is_not_found() => {
                info!(object = %coordinate, "object no longer exists, removing from state");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the object and optionally wait until it is gone
    pub async fn delete(&self, state: &ResourceModel) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if let Err(e) = self.try_delete(state, &mut diagnostics).await {
            diagnostics.push(error_diagnostic(Operation::Delete, &e));
        }
        diagnostics
    }

    async fn try_delete(&self, state: &ResourceModel, diagnostics: &mut Diagnostics) -> Result<()> {
        ensure_online(&self.config)?;
        let coordinate = self.kind.coordinate_for(state)?;
        let wait = state
            .wait_for_delete
            .as_ref()
            .map(|w| w.resolve())
            .transpose()?;

        self.client.delete(&coordinate).await?;

        let Some(wait) = wait else {
            return Ok(());
        };
        let poller = ConditionPoller::new(&self.client);
        if let PollOutcome::TimedOut { elapsed, .. } =
            poller.wait_for_deletion(&coordinate, &wait).await?
        {
            let err = KubeError::Timeout {
                condition: format!("{} is deleted", coordinate),
                elapsed,
            };
            diagnostics.push(timeout_diagnostic(Operation::Delete, &err, None));
        }
        Ok(())
    }

    /// Import an existing object by id (`name` or `namespace/name`)
    pub async fn import_state(&self, id: &str) -> OperationResult {
        match self.try_import(id).await {
            Ok(state) => OperationResult::with_state(state, Diagnostics::new()),
            Err(e) => OperationResult::failed(Operation::Import, &e),
        }
    }

    async fn try_import(&self, id: &str) -> Result<ResourceModel> {
        ensure_online(&self.config)?;
        let coordinate = self.kind.coordinate_from_import_id(id)?;
        let snapshot = self.client.get(&coordinate).await?;
        let mut state = projection::from_value(snapshot)?;
        state.id = Some(coordinate.id());
        Ok(state)
    }

    async fn upsert(&self, plan: ResourceModel, operation: Operation) -> OperationResult {
        let (coordinate, conditions, mut state) = match self.apply(plan, operation).await {
            Ok(applied) => applied,
            Err(e) => return OperationResult::failed(operation, &e),
        };

        let mut diagnostics = Diagnostics::new();
        let poller = ConditionPoller::new(&self.client);

        // Conditions run one after another, each against its own timeout.
        for condition in &conditions {
            match poller.wait_for_condition(&coordinate, condition).await {
                Ok(PollOutcome::Satisfied {
                    snapshot: Some(snapshot),
                    fetches,
                }) => {
                    debug!(object = %coordinate, condition = %condition, fetches, "condition met");
                    match state_from_snapshot(snapshot, &state) {
                        Ok(refreshed) => state = refreshed,
                        Err(e) => {
                            diagnostics.push(error_diagnostic(operation, &e));
                            break;
                        }
                    }
                }
                Ok(PollOutcome::Satisfied { snapshot: None, .. }) => {}
                Ok(PollOutcome::TimedOut {
                    elapsed,
                    last_value,
                    ..
                }) => {
                    let err = KubeError::Timeout {
                        condition: condition.to_string(),
                        elapsed,
                    };
                    diagnostics.push(timeout_diagnostic(operation, &err, last_value.as_deref()));
                    break;
                }
                Err(e) => {
                    diagnostics.push(error_diagnostic(operation, &e));
                    break;
                }
            }
        }

        OperationResult::with_state(state, diagnostics)
    }

    /// Validate, project and apply; returns the state built from the response
    async fn apply(
        &self,
        mut plan: ResourceModel,
        operation: Operation,
    ) -> Result<(ResourceCoordinate, Vec<WaitCondition>, ResourceModel)> {
        ensure_online(&self.config)?;
        let coordinate = self.kind.prepare(&mut plan)?;
        let conditions = plan
            .wait_for
            .iter()
            .map(|w| w.resolve())
            .collect::<crdform_core::Result<Vec<_>>>()?;
        if let Some(wait) = &plan.wait_for_delete {
            wait.resolve()?;
        }

        if operation == Operation::Create {
            plan.id = Some(coordinate.id());
        }

        let field_manager = self.config.field_manager_for(&plan);
        let body = projection::to_value(&plan)?;
        let snapshot = self.client.apply(&coordinate, &body, &field_manager).await?;
        let state = state_from_snapshot(snapshot, &plan)?;

        Ok((coordinate, conditions, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockApplyClient, MockResponse, OperationCounts};
    use crdform_core::{ObjectMetadata, Severity, WaitForDelete, WaitForUpsert};
    use serde_json::json;

    fn widgets() -> KindSpec {
        KindSpec::namespaced("example.com", "v1", "Widget", "widgets")
    }

    fn coord(name: &str) -> ResourceCoordinate {
        ResourceCoordinate::namespaced("example.com", "v1", "widgets", "default", name)
    }

    fn lifecycle(mock: &MockApplyClient) -> ResourceLifecycle<MockApplyClient> {
        ResourceLifecycle::new(mock.clone(), Arc::new(ProviderConfig::default()), widgets())
    }

    fn plan(name: &str) -> ResourceModel {
        ResourceModel::new(
            ObjectMetadata::namespaced("default", name),
            Some(json!({ "size": 3 })),
        )
    }

    fn snapshot(name: &str, phase: &str, size: i64) -> MockResponse {
        MockResponse::Object(json!({
            "apiVersion": "example.com/v1",
            "kind": "Widget",
            "metadata": { "name": name, "namespace": "default", "uid": "1234" },
            "spec": { "size": size },
            "status": { "phase": phase }
        }))
    }

    fn wait_ready() -> WaitForUpsert {
        WaitForUpsert::new("status.phase", Some("Ready"))
            .with_timeout("10s")
            .with_poll_interval("1s")
    }

    #[tokio::test]
    async fn test_create_without_wait() {
        let mock = MockApplyClient::new();
        let result = lifecycle(&mock).create(plan("x")).await;

        assert!(result.diagnostics.is_empty());
        let state = result.state.unwrap();
        assert_eq!(state.id.as_deref(), Some("default/x"));
        assert_eq!(state.api_version, "example.com/v1");
        assert_eq!(state.kind, "Widget");
        assert_eq!(state.spec, Some(json!({ "size": 3 })));

        let applied = mock.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].field_manager.field_manager, "crdform");
        assert_eq!(applied[0].body["kind"], "Widget");
        assert!(applied[0].body.get("wait_for").is_none());
        assert_eq!(mock.operation_counts().gets, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_waits_for_ready() {
        let mock = MockApplyClient::new();
        mock.script_gets(
            &coord("x"),
            vec![
                snapshot("x", "Pending", 3),
                snapshot("x", "Pending", 3),
                snapshot("x", "Ready", 5),
            ],
        );

        let result = lifecycle(&mock)
            .create(plan("x").with_wait_for(wait_ready()))
            .await;

        assert!(result.diagnostics.is_empty());
        assert_eq!(mock.operation_counts().gets, 3);
        let state = result.state.unwrap();
        // Final state comes from the snapshot that satisfied the condition
        assert_eq!(state.spec, Some(json!({ "size": 5 })));
        assert_eq!(state.metadata.name, "x");
        assert_eq!(state.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(state.id.as_deref(), Some("default/x"));
        assert_eq!(state.wait_for.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_waits_for_all_conditions() {
        let mock = MockApplyClient::new();
        mock.script_gets(
            &coord("x"),
            vec![
                snapshot("x", "Pending", 3),
                snapshot("x", "Ready", 3),
                MockResponse::Object(json!({
                    "apiVersion": "example.com/v1",
                    "kind": "Widget",
                    "metadata": { "name": "x", "namespace": "default" },
                    "spec": { "size": 7 },
                    "status": { "phase": "Ready", "replicas": 7 }
                })),
            ],
        );

        let replicas = WaitForUpsert::new("status.replicas", None)
            .with_timeout("10s")
            .with_poll_interval("1s");
        let result = lifecycle(&mock)
            .create(plan("x").with_wait_for(wait_ready()).with_wait_for(replicas))
            .await;

        assert!(result.diagnostics.is_empty());
        assert_eq!(mock.operation_counts().gets, 3);
        let state = result.state.unwrap();
        assert_eq!(state.spec, Some(json!({ "size": 7 })));
        assert_eq!(state.wait_for.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_condition_timeout_is_warning() {
        let mock = MockApplyClient::new();
        mock.script_gets(&coord("x"), vec![snapshot("x", "Ready", 3)]);

        let never = WaitForUpsert::new("status.never", None)
            .with_timeout("3s")
            .with_poll_interval("1s");
        let result = lifecycle(&mock)
            .create(plan("x").with_wait_for(wait_ready()).with_wait_for(never))
            .await;

        assert!(!result.has_errors());
        let warnings: Vec<_> = result.diagnostics.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].summary.starts_with("Create: "));
        assert!(warnings[0].detail.contains("status.never"));
        assert!(result.state.is_some());
        // One fetch for the first condition, then t=0..3s for the second
        assert_eq!(mock.operation_counts().gets, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_timeout_is_warning() {
        let mock = MockApplyClient::new();
        mock.script_gets(&coord("x"), vec![snapshot("x", "Pending", 3)]);

        let result = lifecycle(&mock)
            .create(plan("x").with_wait_for(wait_ready()))
            .await;

        assert!(!result.has_errors());
        let warnings: Vec<_> = result.diagnostics.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].summary.starts_with("Create: "));
        assert!(warnings[0].detail.contains("status.phase"));
        assert!(warnings[0].detail.contains("Pending"));
        // The applied object stays recorded
        assert!(result.state.is_some());
        assert_eq!(mock.operation_counts().gets, 11);
    }

    #[tokio::test]
    async fn test_conflict_is_not_retried() {
        let mock = MockApplyClient::new();
        mock.set_conflict(&coord("x"), "conflict with \"kubectl\": .spec.size");

        let result = lifecycle(&mock).create(plan("x")).await;

        assert!(result.has_errors());
        assert!(result.state.is_none());
        let error = result.diagnostics.errors().next().unwrap();
        assert_eq!(error.summary, "Create: Server-side apply conflict");
        assert!(error.detail.contains("force_conflicts"));
        assert_eq!(mock.operation_counts().applies, 1);
    }

    #[tokio::test]
    async fn test_rejected_apply_is_error() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let prior = lc.create(plan("x")).await.state.unwrap();
        mock.reset_counts();
        mock.fail_apply(&coord("x"), 422, "spec.size: Invalid value: -1");

        let result = lc.update(&prior, plan("x")).await;

        assert!(result.state.is_none());
        let error = result.diagnostics.errors().next().unwrap();
        assert_eq!(error.summary, "Update: Kubernetes API request failed");
        assert!(error.detail.contains("(422)"));
        assert_eq!(
            mock.operation_counts(),
            OperationCounts {
                applies: 1,
                gets: 0,
                deletes: 0
            }
        );
    }

    #[tokio::test]
    async fn test_resource_force_conflicts_override() {
        let mock = MockApplyClient::new();
        mock.set_conflict(&coord("x"), "conflict");

        let plan = ResourceModel {
            force_conflicts: Some(true),
            field_manager: Some("ci".to_string()),
            ..plan("x")
        };
        let result = lifecycle(&mock).create(plan).await;

        assert!(result.diagnostics.is_empty());
        let applied = mock.applied();
        assert!(applied[0].field_manager.force_conflicts);
        assert_eq!(applied[0].field_manager.field_manager, "ci");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_wait_before_apply() {
        let mock = MockApplyClient::new();
        let bad = plan("x").with_wait_for(WaitForUpsert::new("status..phase", None));

        let result = lifecycle(&mock).create(bad).await;
        assert!(result.has_errors());
        assert_eq!(mock.operation_counts().applies, 0);
    }

    #[tokio::test]
    async fn test_create_requires_namespace() {
        let mock = MockApplyClient::new();
        let result = lifecycle(&mock)
            .create(ResourceModel::new(ObjectMetadata::cluster("x"), None))
            .await;
        assert!(result.has_errors());
        assert_eq!(mock.operation_counts().applies, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_during_wait_is_error() {
        let mock = MockApplyClient::new();
        mock.script_gets(&coord("x"), vec![MockResponse::NotFound]);

        let result = lifecycle(&mock)
            .create(plan("x").with_wait_for(wait_ready()))
            .await;
        assert!(result.has_errors());
        assert!(result.state.is_some());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let prior = lc.create(plan("x")).await.state.unwrap();

        let mut next = plan("x");
        next.spec = Some(json!({ "size": 7 }));
        let result = lc.update(&prior, next).await;

        assert!(result.diagnostics.is_empty());
        let state = result.state.unwrap();
        assert_eq!(state.id, prior.id);
        assert_eq!(state.spec, Some(json!({ "size": 7 })));
        assert_eq!(mock.operation_counts().applies, 2);
    }

    #[tokio::test]
    async fn test_update_rejects_rename() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let prior = lc.create(plan("x")).await.state.unwrap();

        let result = lc.update(&prior, plan("y")).await;
        assert!(result.has_errors());
        assert!(result.diagnostics.errors().next().unwrap().summary.starts_with("Update: "));
        assert_eq!(mock.operation_counts().applies, 1);
    }

    #[tokio::test]
    async fn test_read_refreshes_and_drops_status() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let prior = lc
            .create(plan("x").with_wait_for_delete(WaitForDelete::default()))
            .await
            .state
            .unwrap();

        mock.insert_object(
            &coord("x"),
            json!({
                "apiVersion": "example.com/v1",
                "kind": "Widget",
                "metadata": { "name": "x", "namespace": "default", "labels": { "team": "a" } },
                "spec": { "size": 9 },
                "status": { "phase": "Ready" }
            }),
        );

        let result = lc.read(&prior).await;
        let state = result.state.unwrap();
        assert_eq!(state.spec, Some(json!({ "size": 9 })));
        assert_eq!(state.metadata.labels.unwrap()["team"], "a");
        assert!(state.wait_for_delete.is_some());
        assert_eq!(state.id.as_deref(), Some("default/x"));
    }

    #[tokio::test]
    async fn test_read_not_found_removes_state() {
        let mock = MockApplyClient::new();
        let result = lifecycle(&mock).read(&plan("gone")).await;
        assert!(result.state.is_none());
        assert!(result.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_read_api_error() {
        let mock = MockApplyClient::new();
        mock.script_gets(
            &coord("x"),
            vec![MockResponse::Error {
                status: 403,
                message: "forbidden".to_string(),
            }],
        );
        let result = lifecycle(&mock).read(&plan("x")).await;
        assert!(result.has_errors());
        assert_eq!(
            result.diagnostics.errors().next().unwrap().summary,
            "Read: Kubernetes API request failed"
        );
    }

    #[tokio::test]
    async fn test_delete_without_wait() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let state = lc.create(plan("x")).await.state.unwrap();

        let diagnostics = lc.delete(&state).await;
        assert!(diagnostics.is_empty());
        assert!(mock.object(&coord("x")).is_none());
        assert_eq!(mock.operation_counts().gets, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_waits_until_gone() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let state = plan("x").with_wait_for_delete(WaitForDelete::default());
        mock.script_gets(
            &coord("x"),
            vec![snapshot("x", "Terminating", 3), MockResponse::NotFound],
        );

        let diagnostics = lc.delete(&state).await;
        assert!(diagnostics.is_empty());
        let counts = mock.operation_counts();
        assert_eq!(counts.deletes, 1);
        assert_eq!(counts.gets, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_wait_timeout_is_warning() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);
        let state = plan("x").with_wait_for_delete(WaitForDelete {
            timeout: "10s".to_string(),
            poll_interval: "5s".to_string(),
        });
        mock.script_gets(&coord("x"), vec![snapshot("x", "Terminating", 3)]);

        let diagnostics = lc.delete(&state).await;
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warnings().count(), 1);
        assert!(
            diagnostics
                .warnings()
                .next()
                .unwrap()
                .summary
                .starts_with("Delete: ")
        );
    }

    #[tokio::test]
    async fn test_import_namespaced() {
        let mock = MockApplyClient::new();
        mock.script_gets(&coord("x"), vec![snapshot("x", "Ready", 4)]);

        let result = lifecycle(&mock).import_state("default/x").await;
        let state = result.state.unwrap();
        assert_eq!(state.id.as_deref(), Some("default/x"));
        assert_eq!(state.kind, "Widget");
        assert_eq!(state.spec, Some(json!({ "size": 4 })));
    }

    #[tokio::test]
    async fn test_import_malformed_id() {
        let mock = MockApplyClient::new();
        let lc = lifecycle(&mock);

        for id in ["x", "a/b/c", "/x", "default/"] {
            let result = lc.import_state(id).await;
            assert!(result.has_errors(), "expected '{}' to be rejected", id);
            assert!(
                result
                    .diagnostics
                    .errors()
                    .next()
                    .unwrap()
                    .summary
                    .starts_with("Import: ")
            );
        }
        assert_eq!(mock.operation_counts().gets, 0);
    }

    #[tokio::test]
    async fn test_import_missing_object() {
        let mock = MockApplyClient::new();
        let result = lifecycle(&mock).import_state("default/x").await;
        assert!(result.has_errors());
        assert!(result.state.is_none());
    }

    #[tokio::test]
    async fn test_offline_refuses_cluster_operations() {
        let mock = MockApplyClient::new();
        let config = ProviderConfig {
            offline: true,
            ..Default::default()
        };
        let lc = ResourceLifecycle::new(mock.clone(), Arc::new(config), widgets());

        let result = lc.create(plan("x")).await;
        assert!(result.has_errors());
        assert!(
            result
                .diagnostics
                .errors()
                .next()
                .unwrap()
                .detail
                .contains("offline")
        );
        assert!(lc.read(&plan("x")).await.has_errors());
        assert!(lc.delete(&plan("x")).await.has_errors());
        assert_eq!(mock.operation_counts(), OperationCounts::default());
    }
}
