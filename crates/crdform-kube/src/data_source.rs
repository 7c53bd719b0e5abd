//! Read-only data source for one kind

use std::sync::Arc;
use tracing::debug;

use crdform_core::{Diagnostics, KindSpec, ObjectMetadata, ProviderConfig, ResourceModel, projection};

use crate::client::ApplyClient;
use crate::error::Result;
use crate::lifecycle::{Operation, OperationResult, ensure_online, error_diagnostic};

/// Fetches a live object by name and namespace
///
/// Only `metadata` and `spec` are surfaced; a missing object is an error.
pub struct DataSource<C: ApplyClient> {
    client: C,
    config: Arc<ProviderConfig>,
    kind: KindSpec,
}

impl<C: ApplyClient> DataSource<C> {
    pub fn new(client: C, config: Arc<ProviderConfig>, kind: KindSpec) -> Self {
        Self {
            client,
            config,
            kind,
        }
    }

    pub async fn read(&self, metadata: &ObjectMetadata) -> OperationResult {
        match self.try_read(metadata).await {
            Ok(state) => OperationResult {
                state: Some(state),
                diagnostics: Diagnostics::new(),
            },
            Err(e) => {
                let mut diagnostics = Diagnostics::new();
                diagnostics.push(error_diagnostic(Operation::Read, &e));
                OperationResult {
                    state: None,
                    diagnostics,
                }
            }
        }
    }

    async fn try_read(&self, metadata: &ObjectMetadata) -> Result<ResourceModel> {
        ensure_online(&self.config)?;
        let coordinate = self
            .kind
            .coordinate(metadata.namespace.as_deref(), &metadata.name)?;

        let snapshot = self.client.get(&coordinate).await?;
        debug!(object = %coordinate, "read data source");

        let mut state = projection::from_value(snapshot)?;
        state.api_version = self.kind.api_version();
        state.kind = self.kind.kind.clone();
        state.id = Some(coordinate.id());
        Ok(state)
    }
}
