//! Manifest command - render a resource file as a Kubernetes manifest

use std::path::Path;

use crdform_core::render_manifest;

use crate::error::{CliError, Result};
use crate::input::ResourceFile;

pub fn run(file: &Path) -> Result<()> {
    let input = ResourceFile::load(file)?;
    let kind = input.kind_spec();
    let rendered = render_manifest(&kind, input.into_model())?;

    let yaml = rendered
        .yaml
        .ok_or_else(|| CliError::internal("manifest rendering produced no YAML"))?;
    print!("{}", yaml);
    Ok(())
}
