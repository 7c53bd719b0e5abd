//! Display formatting for CLI output
//!
//! Diagnostics go to stderr, state and manifests to stdout so the output of
//! one command can be redirected into the next.

use clap::ValueEnum;
use console::style;

use crdform_core::{AttributeMode, AttributeSchema, AttributeType, Diagnostics, EntitySchema, Severity};

use crate::error::{CliError, Result};
use crate::input::ResourceFile;

/// Output format for state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Print diagnostics to stderr
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for diag in diagnostics.iter() {
        let label = match diag.severity {
            Severity::Error => style("error").red().bold(),
            Severity::Warning => style("warning").yellow().bold(),
        };
        eprintln!("{}: {}", label, style(&diag.summary).bold());
        if !diag.detail.is_empty() {
            for line in diag.detail.lines() {
                eprintln!("  {}", line);
            }
        }
    }
}

/// Render state in the requested format
pub fn render_state(state: &ResourceFile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(state).map_err(|e| CliError::internal(e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(state)
            .map(|s| s + "\n")
            .map_err(|e| CliError::internal(e.to_string())),
    }
}

/// Print entity schemas as an indented tree
pub fn print_schemas(schemas: &[EntitySchema]) {
    for (i, schema) in schemas.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let entity = serde_json::to_value(schema.entity)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default();
        println!("{} {}", style(entity).dim(), style(&schema.type_name).cyan().bold());
        for attr in &schema.attributes {
            print_attribute(attr, 1);
        }
    }
}

fn print_attribute(attr: &AttributeSchema, depth: usize) {
    let indent = "  ".repeat(depth);
    let mode = match attr.mode {
        AttributeMode::Required => style("required").red(),
        AttributeMode::Optional => style("optional").green(),
        AttributeMode::Computed => style("computed").dim(),
        AttributeMode::OptionalComputed => style("optional, computed").green(),
    };
    let (ty, children) = match &attr.ty {
        AttributeType::String => ("string", None),
        AttributeType::Bool => ("bool", None),
        AttributeType::Map => ("map(string)", None),
        AttributeType::Dynamic => ("dynamic", None),
        AttributeType::Object(fields) => ("object", Some(fields)),
        AttributeType::List(fields) => ("list(object)", Some(fields)),
    };
    println!("{}{} {} ({})", indent, attr.name, style(ty).yellow(), mode);
    for child in children.into_iter().flatten() {
        print_attribute(child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crdform_core::ObjectMetadata;

    fn state() -> ResourceFile {
        ResourceFile {
            api_version: "example.com/v1".to_string(),
            kind: "Widget".to_string(),
            plural: "widgets".to_string(),
            namespaced: true,
            id: Some("default/w".to_string()),
            metadata: ObjectMetadata::namespaced("default", "w"),
            spec: None,
            wait_for: Vec::new(),
            wait_for_delete: None,
            force_conflicts: None,
            field_manager: None,
        }
    }

    #[test]
    fn test_render_state_yaml() {
        let yaml = render_state(&state(), OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("apiVersion: example.com/v1\n"));
        assert!(yaml.contains("id: default/w"));
        assert!(!yaml.contains("wait_for"));
    }

    #[test]
    fn test_render_state_json() {
        let json = render_state(&state(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["namespace"], "default");
        assert_eq!(value["plural"], "widgets");
    }
}
