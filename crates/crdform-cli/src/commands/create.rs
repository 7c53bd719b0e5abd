//! Create command - apply a resource file and wait for its conditions

use std::path::Path;
use std::sync::Arc;

use crdform_core::ProviderConfig;
use crdform_kube::{Operation, ResourceLifecycle};

use crate::display::OutputFormat;
use crate::error::Result;
use crate::input::ResourceFile;

pub async fn run(config: ProviderConfig, file: &Path, format: OutputFormat) -> Result<()> {
    let input = ResourceFile::load(file)?;
    let kind = input.kind_spec();
    let client = super::cluster_client(&config).await?;

    let lifecycle = ResourceLifecycle::new(client, Arc::new(config), kind.clone());
    let result = lifecycle.create(input.into_model()).await;

    super::finish(Operation::Create, &kind, result, format)
}
