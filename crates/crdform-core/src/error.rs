//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Model could not be projected to or from JSON/YAML
    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("invalid path expression '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("invalid duration '{value}': {message}")]
    InvalidDuration { value: String, message: String },

    #[error("invalid import id '{id}': {message}")]
    InvalidImportId { id: String, message: String },

    #[error("invalid resource: {message}")]
    InvalidModel { message: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization {
            message: e.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(e: serde_yaml::Error) -> Self {
        CoreError::Serialization {
            message: e.to_string(),
        }
    }
}

impl CoreError {
    pub(crate) fn invalid_model(message: impl Into<String>) -> Self {
        CoreError::InvalidModel {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
