//! Integration tests for CLI commands that need no cluster

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const CERTIFICATE: &str = r#"apiVersion: cert-manager.io/v1
kind: Certificate
plural: certificates
metadata:
  name: tls
  namespace: web
  labels:
    app: web
spec:
  secretName: tls
  dnsNames:
    - example.com
wait_for:
  - jsonpath: status.conditions[0].status
    value: "True"
field_manager: ci
"#;

/// Helper to run crdform with an isolated config directory
fn crdform(home: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_crdform"))
        .args(args)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("CRDFORM_CONFIG")
        .env_remove("CRDFORM_OFFLINE")
        .env_remove("CRDFORM_FIELD_MANAGER")
        .env_remove("CRDFORM_FORCE_CONFLICTS")
        .env_remove("CRDFORM_LOG")
        .output()
        .expect("Failed to execute crdform")
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

const KIND_ARGS: [&str; 6] = [
    "--api-version",
    "cert-manager.io/v1",
    "--kind",
    "Certificate",
    "--plural",
    "certificates",
];

mod manifest_command {
    use super::*;

    #[test]
    fn test_manifest_renders_sorted_yaml() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "cert.yaml", CERTIFICATE);

        let output = crdform(dir.path(), &["manifest", &file]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("apiVersion: cert-manager.io/v1\nkind: Certificate\n"));
        assert!(stdout.contains("  namespace: web\n"));
        // Terraform-only fields never reach the manifest
        assert!(!stdout.contains("wait_for"));
        assert!(!stdout.contains("field_manager"));

        let parsed: serde_json::Value =
            serde_yaml::from_str(&stdout).expect("manifest should be valid YAML");
        assert_eq!(parsed["spec"]["dnsNames"][0], "example.com");
    }

    #[test]
    fn test_manifest_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "cert.yaml", CERTIFICATE);

        let first = crdform(dir.path(), &["manifest", &file]);
        let second = crdform(dir.path(), &["manifest", &file]);
        assert_eq!(first.stdout, second.stdout);
    }

    #[test]
    fn test_manifest_works_offline() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "cert.yaml", CERTIFICATE);

        let output = crdform(dir.path(), &["--offline", "manifest", &file]);
        assert!(output.status.success());
    }

    #[test]
    fn test_manifest_rejects_missing_namespace() {
        let dir = TempDir::new().unwrap();
        let file = write(
            &dir,
            "cert.yaml",
            "apiVersion: cert-manager.io/v1\nkind: Certificate\nplural: certificates\nmetadata:\n  name: tls\n",
        );

        let output = crdform(dir.path(), &["manifest", &file]);
        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("namespace"));
    }

    #[test]
    fn test_manifest_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "cert.yaml", "kind: [unclosed\n");

        let output = crdform(dir.path(), &["manifest", &file]);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_manifest_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");

        let output = crdform(dir.path(), &["manifest", &missing.to_string_lossy()]);
        assert_eq!(output.status.code(), Some(5));
    }
}

mod schema_command {
    use super::*;

    #[test]
    fn test_schema_json_lists_three_entities() {
        let dir = TempDir::new().unwrap();
        let mut args = vec!["schema"];
        args.extend(KIND_ARGS);
        args.push("--json");

        let output = crdform(dir.path(), &args);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

        let schemas: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
        let names: Vec<&str> = schemas
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["type_name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "k8s_cert_manager_io_certificate_v1",
                "k8s_cert_manager_io_certificate_v1",
                "k8s_cert_manager_io_certificate_v1_manifest",
            ]
        );
        assert_eq!(schemas[0]["entity"], "resource");
        assert_eq!(schemas[1]["entity"], "data_source");
    }

    #[test]
    fn test_schema_uses_configured_provider_name() {
        let dir = TempDir::new().unwrap();
        let config = write(&dir, "config.yaml", "providerName: crd\n");
        let mut args = vec!["--config", config.as_str(), "schema"];
        args.extend(KIND_ARGS);

        let output = crdform(dir.path(), &args);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("crd_cert_manager_io_certificate_v1_manifest"));
        assert!(stdout.contains("wait_for_delete"));
    }

    #[test]
    fn test_schema_reads_default_config_location() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("crdform")).unwrap();
        std::fs::write(
            dir.path().join("crdform").join("config.yaml"),
            "providerName: mycrds\n",
        )
        .unwrap();
        let mut args = vec!["schema"];
        args.extend(KIND_ARGS);
        args.push("--json");

        let output = crdform(dir.path(), &args);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("mycrds_cert_manager_io_certificate_v1"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = write(&dir, "config.yaml", "fieldManager: ''\n");
        let mut args = vec!["--config", config.as_str(), "schema"];
        args.extend(KIND_ARGS);

        let output = crdform(dir.path(), &args);
        assert_eq!(output.status.code(), Some(4));
    }
}

mod offline_mode {
    use super::*;

    #[test]
    fn test_create_refused_offline() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "cert.yaml", CERTIFICATE);

        let output = crdform(dir.path(), &["--offline", "create", &file]);
        assert_eq!(output.status.code(), Some(4));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("offline"));
    }

    #[test]
    fn test_offline_from_config_file() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "cert.yaml", CERTIFICATE);
        let config = write(&dir, "config.yaml", "offline: true\n");

        let output = crdform(dir.path(), &["--config", &config, "delete", &file]);
        assert_eq!(output.status.code(), Some(4));
    }

    #[test]
    fn test_offline_from_env() {
        let dir = TempDir::new().unwrap();
        let mut args = vec!["import"];
        args.extend(KIND_ARGS);
        args.push("web/tls");

        let output = Command::new(env!("CARGO_BIN_EXE_crdform"))
            .args(&args)
            .env("XDG_CONFIG_HOME", dir.path())
            .env("CRDFORM_OFFLINE", "true")
            .output()
            .expect("Failed to execute crdform");
        assert_eq!(output.status.code(), Some(4));
    }
}
