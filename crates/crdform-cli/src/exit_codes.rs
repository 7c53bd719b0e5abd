//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Input error - invalid resource file, path expression or duration
pub const INPUT_ERROR: i32 = 2;

/// Operation failed - the cluster operation reported error diagnostics
pub const OPERATION_FAILED: i32 = 3;

/// Config error - invalid provider configuration or offline mode
pub const CONFIG_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Cluster unreachable - kubeconfig could not be loaded or the API is down
pub const CLUSTER_ERROR: i32 = 69;
