//! Get command - read a live object the way a data source does

use std::sync::Arc;

use crdform_core::{ObjectMetadata, ProviderConfig};
use crdform_kube::{DataSource, Operation};

use crate::display::OutputFormat;
use crate::error::Result;
use crate::input::KindArgs;

pub async fn run(
    config: ProviderConfig,
    kind_args: &KindArgs,
    namespace: Option<&str>,
    name: &str,
    format: OutputFormat,
) -> Result<()> {
    let kind = kind_args.kind_spec();
    let metadata = ObjectMetadata {
        name: name.to_string(),
        namespace: namespace.map(String::from),
        ..Default::default()
    };
    let client = super::cluster_client(&config).await?;

    let data_source = DataSource::new(client, Arc::new(config), kind.clone());
    let result = data_source.read(&metadata).await;

    super::finish(Operation::Read, &kind, result, format)
}
