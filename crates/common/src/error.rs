//! Error types for the Chumchon E2E suite

use thiserror::Error;

use crate::credentials::Role;

/// Result type alias using the suite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration-level errors. These fail fast: a scenario referencing a
/// role that cannot be resolved never reaches the browser.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown role: no credentials registered for '{0}'")]
    UnknownRole(Role),

    #[error("Missing credential: role '{role}' has an empty {field}")]
    MissingCredential { role: Role, field: &'static str },

    #[error("Base URL is not configured: set {0}")]
    BaseUrlNotConfigured(&'static str),

    #[error("Unsupported browser '{0}': expected chromium, firefox or webkit")]
    UnsupportedBrowser(String),

    #[error("Credential file error: {0}")]
    CredentialFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
