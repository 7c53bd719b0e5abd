//! Delete command - delete the object and optionally wait until it is gone

use console::style;
use std::path::Path;
use std::sync::Arc;

use crdform_core::ProviderConfig;
use crdform_kube::{Operation, ResourceLifecycle};

use crate::display;
use crate::error::Result;
use crate::input::ResourceFile;

pub async fn run(config: ProviderConfig, state: &Path) -> Result<()> {
    let input = ResourceFile::load(state)?;
    let kind = input.kind_spec();
    let client = super::cluster_client(&config).await?;

    let lifecycle = ResourceLifecycle::new(client, Arc::new(config), kind.clone());
    let model = input.into_model();
    let diagnostics = lifecycle.delete(&model).await;

    display::print_diagnostics(&diagnostics);
    super::check(Operation::Delete, &diagnostics)?;

    println!(
        "{} Deleted {} {}",
        style("✓").green().bold(),
        kind.kind,
        style(kind.coordinate_for(&model)?.id()).cyan()
    );
    Ok(())
}
