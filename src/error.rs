//! Error types for office-export-client
//!
//! Two recoverable error classes come out of the export pipeline:
//! - [`CatalogFetchError`] when the template catalog cannot be read
//! - [`ExportError`] when the generation service exchange fails for any reason
//!
//! Both are terminal for the current operation only. [`Error`] wraps them together
//! with the configuration, busy-token and local file errors raised around them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for office-export-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// User-facing message for a failed export, whatever the cause
pub const EXPORT_FAILED_MESSAGE: &str = "export failed, check that the document service is running";

/// User-facing message for an unavailable template catalog
pub const CATALOG_UNAVAILABLE_MESSAGE: &str =
    "failed to load the template list, check that the document service is running";

/// Main error type for office-export-client
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "service.base_url")
        key: Option<String>,
    },

    /// Template catalog could not be fetched
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogFetchError),

    /// The export exchange with the generation service failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Another export currently holds the in-progress token
    #[error("an export is already in progress")]
    Busy,

    /// The suggested file name cannot be used as a local file name
    #[error("invalid file name {name:?}: {reason}")]
    InvalidFileName {
        /// The rejected base name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Target file already exists and the collision action forbids replacing it
    #[error("file collision at {path}: {reason}")]
    FileCollision {
        /// The path where the collision occurred
        path: PathBuf,
        /// The reason for the collision
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Coarse message suitable for showing to the person who triggered the action
    ///
    /// Export failures never reveal their cause here; the detail is only logged.
    pub fn user_message(&self) -> String {
        match self {
            Error::Export(_) => EXPORT_FAILED_MESSAGE.to_string(),
            Error::Catalog(_) => CATALOG_UNAVAILABLE_MESSAGE.to_string(),
            Error::Busy => "an export is already running, wait for it to finish".to_string(),
            other => other.to_string(),
        }
    }
}

/// Template catalog fetch failures
///
/// Callers of [`TemplateCatalogClient::fetch_templates`](crate::catalog::TemplateCatalogClient::fetch_templates)
/// never see these; they are reduced to an empty list plus an advisory event.
#[derive(Debug, Error)]
pub enum CatalogFetchError {
    /// The request could not be sent or the body could not be read
    #[error("failed to reach template catalog at {url}: {reason}")]
    Request {
        /// Catalog endpoint
        url: String,
        /// Underlying transport error
        reason: String,
    },

    /// The catalog answered with a non-success status
    #[error("template catalog at {url} returned HTTP {status}")]
    Status {
        /// Catalog endpoint
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The catalog body was not the expected JSON envelope
    #[error("failed to decode template catalog: {0}")]
    Decode(String),
}

/// The export exchange failed
///
/// Connection errors, non-2xx statuses, timeouts and serialization failures all
/// collapse into this one value. The cause is logged where it happens and is
/// deliberately not carried upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("export failed")]
pub struct ExportError;
