//! Manifest data source: render a resource as YAML without a cluster

use crate::error::Result;
use crate::model::ResourceModel;
use crate::projection;
use crate::schema::KindSpec;

/// Validate `model` against `kind` and fill in `yaml` and `id`
///
/// `apiVersion` and `kind` always come from the kind descriptor, so the
/// rendered manifest is self-contained.
pub fn render_manifest(kind: &KindSpec, mut model: ResourceModel) -> Result<ResourceModel> {
    let coordinate = kind.prepare(&mut model)?;
    let yaml = projection::to_yaml(&model)?;
    model.id = Some(coordinate.id());
    model.yaml = Some(yaml);
    Ok(model)
}
