//! Import command - adopt an existing object by id

use std::sync::Arc;

use crdform_core::ProviderConfig;
use crdform_kube::{Operation, ResourceLifecycle};

use crate::display::OutputFormat;
use crate::error::Result;
use crate::input::KindArgs;

pub async fn run(
    config: ProviderConfig,
    kind_args: &KindArgs,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    let kind = kind_args.kind_spec();
    let client = super::cluster_client(&config).await?;

    let lifecycle = ResourceLifecycle::new(client, Arc::new(config), kind.clone());
    let result = lifecycle.import_state(id).await;

    super::finish(Operation::Import, &kind, result, format)
}
