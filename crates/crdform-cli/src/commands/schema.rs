//! Schema command - list the Terraform entities a kind exposes

use crdform_core::ProviderConfig;

use crate::display;
use crate::error::{CliError, Result};
use crate::input::KindArgs;

pub fn run(config: &ProviderConfig, kind_args: &KindArgs, json: bool) -> Result<()> {
    let schemas = kind_args.kind_spec().schemas(&config.provider_name);

    if json {
        let out = serde_json::to_string_pretty(&schemas)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    display::print_schemas(&schemas);
    Ok(())
}
