//! # office-export-client
//!
//! Client library for a remote Office document-generation service.
//!
//! Pick a template and a document type, and the client builds the matching
//! request, sends it to the service, and saves the returned file locally.
//!
//! ## Pipeline
//!
//! 1. [`catalog`] - fetches the template list once at startup (excel templates only)
//! 2. [`payload`] - maps (document type, template id, title) to the request body
//! 3. [`gateway`] - one POST per export, response kept as raw bytes
//! 4. [`sink`] - writes the bytes as `<file name>.<extension>`
//!
//! [`ExportClient`] ties them together, allows one export at a time and reports
//! progress as [`Event`]s.
//!
//! ## Quick Start
//!
//! ```no_run
//! use office_export_client::{Config, DocumentType, ExportClient, ExportForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ExportClient::new(Config::from_env()?).await?;
//!
//!     for template in client.templates() {
//!         println!("{} - {}", template.name, template.description);
//!     }
//!
//!     let form = ExportForm::new("季度报价", "quote", "quote-q3");
//!     let outcome = client.export(&form, DocumentType::Excel).await?;
//!     println!("saved {}", outcome.path.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Template catalog retrieval
pub mod catalog;
/// Export client and its state machine
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Export request to the generation service
pub mod gateway;
/// Request payload construction
pub mod payload;
/// Local persistence of exported files
pub mod sink;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use catalog::TemplateCatalogClient;
pub use client::{ExportClient, ExportClientBuilder};
pub use config::{Config, FileCollisionAction, OutputConfig, ServiceConfig};
pub use error::{CatalogFetchError, Error, ExportError, Result};
pub use gateway::{ExportGateway, HttpExportGateway};
pub use payload::{ExportRequest, Sheet};
pub use sink::{DirectorySink, DownloadSink};
pub use types::{
    DocumentType, Event, ExportForm, ExportOutcome, ExportResult, ExportStage, TemplateDescriptor,
};
