//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use thiserror::Error;

use crdform_core::CoreError;
use crdform_kube::{KubeError, Operation};

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Invalid resource file or argument
    #[error("Invalid input: {message}")]
    #[diagnostic(code(crdform::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Invalid provider configuration
    #[error("Configuration error: {message}")]
    #[diagnostic(code(crdform::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A resource operation reported error diagnostics
    #[error("{operation} failed with {errors} error(s) and {warnings} warning(s)")]
    #[diagnostic(code(crdform::cli::operation))]
    OperationFailed {
        operation: String,
        errors: usize,
        warnings: usize,
    },

    /// The cluster could not be reached
    #[error("Cluster error: {message}")]
    #[diagnostic(
        code(crdform::cli::cluster),
        help("check your kubeconfig and current context, or run offline commands only")
    )]
    Cluster { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(crdform::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(crdform::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::OperationFailed { .. } => exit_codes::OPERATION_FAILED,
            CliError::Cluster { .. } => exit_codes::CLUSTER_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: None,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// An operation finished with error diagnostics
    pub fn operation_failed(operation: Operation, errors: usize, warnings: usize) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            errors,
            warnings,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => e.into(),
            CoreError::Config { message } => CliError::Config {
                message,
                help: None,
            },
            other => CliError::input(other.to_string()),
        }
    }
}

impl From<KubeError> for CliError {
    fn from(err: KubeError) -> Self {
        match err {
            KubeError::InvalidConfig(message) => CliError::Config {
                message,
                help: None,
            },
            other => CliError::Cluster {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::input("bad").exit_code(), exit_codes::INPUT_ERROR);
        assert_eq!(
            CliError::operation_failed(Operation::Create, 1, 0).exit_code(),
            exit_codes::OPERATION_FAILED
        );
        assert_eq!(
            CliError::internal("boom").exit_code(),
            exit_codes::ERROR
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let err: CliError = CoreError::InvalidDuration {
            value: "soon".to_string(),
            message: "unknown unit".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Input { .. }));

        let err: CliError = CoreError::Config {
            message: "fieldManager must not be empty".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_operation_failed_message() {
        let err = CliError::operation_failed(Operation::Delete, 1, 2);
        assert_eq!(
            err.to_string(),
            "Delete failed with 1 error(s) and 2 warning(s)"
        );
    }
}
