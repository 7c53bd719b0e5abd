//! CLI commands

use console::style;
use tracing::debug;

use crdform_core::{KindSpec, ProviderConfig};
use crdform_kube::{KubeApplyClient, Operation, OperationResult};

use crate::display::{self, OutputFormat};
use crate::error::{CliError, Result};
use crate::input::ResourceFile;

// Offline commands
pub mod manifest;
pub mod schema;

// Cluster commands
pub mod create;
pub mod delete;
pub mod get;
pub mod import;
pub mod read;
pub mod update;

/// Connect to the cluster from the default kubeconfig
async fn cluster_client(config: &ProviderConfig) -> Result<KubeApplyClient> {
    if config.offline {
        return Err(CliError::config_with_help(
            "provider is configured offline",
            "unset CRDFORM_OFFLINE / --offline, or use `manifest` and `schema` which need no cluster",
        ));
    }
    debug!("loading kubeconfig");
    Ok(KubeApplyClient::try_default().await?)
}

/// Print diagnostics and state, failing if any diagnostic is an error
fn finish(
    operation: Operation,
    kind: &KindSpec,
    result: OperationResult,
    format: OutputFormat,
) -> Result<()> {
    display::print_diagnostics(&result.diagnostics);

    match result.state {
        Some(state) => {
            let file = ResourceFile::from_model(kind, state);
            print!("{}", display::render_state(&file, format)?);
        }
        None if !result.diagnostics.has_errors() => {
            eprintln!(
                "{} object no longer exists; it would be removed from state",
                style("!").yellow()
            );
        }
        None => {}
    }

    check(operation, &result.diagnostics)
}

fn check(operation: Operation, diagnostics: &crdform_core::Diagnostics) -> Result<()> {
    if diagnostics.has_errors() {
        return Err(CliError::operation_failed(
            operation,
            diagnostics.errors().count(),
            diagnostics.warnings().count(),
        ));
    }
    Ok(())
}
