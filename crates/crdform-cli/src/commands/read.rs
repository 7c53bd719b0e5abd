//! Read command - refresh state from the cluster

use std::path::Path;
use std::sync::Arc;

use crdform_core::ProviderConfig;
use crdform_kube::{Operation, ResourceLifecycle};

use crate::display::OutputFormat;
use crate::error::Result;
use crate::input::ResourceFile;

pub async fn run(config: ProviderConfig, state: &Path, format: OutputFormat) -> Result<()> {
    let input = ResourceFile::load(state)?;
    let kind = input.kind_spec();
    let client = super::cluster_client(&config).await?;

    let lifecycle = ResourceLifecycle::new(client, Arc::new(config), kind.clone());
    let result = lifecycle.read(&input.into_model()).await;

    super::finish(Operation::Read, &kind, result, format)
}
