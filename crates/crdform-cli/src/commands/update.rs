//! Update command - re-apply a resource on top of its prior state

use std::path::Path;
use std::sync::Arc;

use crdform_core::ProviderConfig;
use crdform_kube::{Operation, ResourceLifecycle};

use crate::display::OutputFormat;
use crate::error::{CliError, Result};
use crate::input::ResourceFile;

pub async fn run(
    config: ProviderConfig,
    state: &Path,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let prior = ResourceFile::load(state)?;
    let plan = ResourceFile::load(file)?;
    let kind = plan.kind_spec();
    if prior.kind_spec() != kind {
        return Err(CliError::input_with_help(
            format!(
                "state is a {} {} but the resource file is a {} {}",
                prior.api_version, prior.kind, plan.api_version, plan.kind
            ),
            "changing apiVersion or kind requires deleting and creating the resource",
        ));
    }

    let client = super::cluster_client(&config).await?;
    let lifecycle = ResourceLifecycle::new(client, Arc::new(config), kind.clone());
    let result = lifecycle.update(&prior.into_model(), plan.into_model()).await;

    super::finish(Operation::Update, &kind, result, format)
}
