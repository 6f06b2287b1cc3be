//! Error types for the ScanOps CLI

use thiserror::Error;

/// Result type alias for ScanOps operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A response body did not match the schema the status code promised.
    #[error("failed to parse {context} response: {source}")]
    Parse {
        context: &'static str,
        source: serde_json::Error,
    },

    /// A well-formed error response from the service.
    #[error("service error: CODE: {code}, {message}")]
    Service { code: i32, message: String },

    /// The service answered with a status code outside the contract.
    #[error("unknown response status code {0}")]
    Protocol(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network("Request timed out".to_string())
        } else if err.is_connect() {
            Error::Network("Failed to connect to the platform".to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Problems with the user-supplied scan or project input document
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to open input file {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Input in bad format: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no input was given")]
    Missing,
}

/// Upload channel failures
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to request an upload location: {0}")]
    Presign(String),

    #[error("Failed to upload sources file: {0}")]
    Transfer(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `scanops init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
