//! Export exchange with the document-generation service.

use crate::config::ServiceConfig;
use crate::error::{Error, ExportError, Result};
use crate::payload::ExportRequest;
use crate::types::DocumentType;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// Sends a built request to the generation service and returns the file bytes
///
/// Implementations make at most one attempt per call. Whatever goes wrong, the
/// caller only ever sees [`ExportError`].
///
/// # Examples
///
/// ```no_run
/// use office_export_client::config::ServiceConfig;
/// use office_export_client::gateway::{ExportGateway, HttpExportGateway};
/// use office_export_client::{DocumentType, payload};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpExportGateway::new(&ServiceConfig::default())?;
/// let request = payload::build(DocumentType::Excel, "quote", "Quarterly quote");
/// let bytes = gateway.send(&request, DocumentType::Excel).await?;
/// println!("received {} bytes", bytes.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ExportGateway: Send + Sync {
    /// Perform one export exchange
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] on connection failure, non-2xx status,
    /// serialization failure or an unreadable response body.
    async fn send(
        &self,
        request: &ExportRequest,
        document_type: DocumentType,
    ) -> std::result::Result<Vec<u8>, ExportError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// [`ExportGateway`] over HTTP
pub struct HttpExportGateway {
    http_client: reqwest::Client,
    service: ServiceConfig,
}

impl HttpExportGateway {
    /// Create a gateway for the configured service
    ///
    /// No client-level timeout is set here; the export client bounds the whole
    /// exchange with [`ServiceConfig::request_timeout`].
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(service: &ServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(service.user_agent.as_str())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            service: service.clone(),
        })
    }
}

#[async_trait]
impl ExportGateway for HttpExportGateway {
    async fn send(
        &self,
        request: &ExportRequest,
        document_type: DocumentType,
    ) -> std::result::Result<Vec<u8>, ExportError> {
        let url = self.service.export_url(document_type.as_str());

        let body = serde_json::to_vec(request).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to serialize export request");
            ExportError
        })?;

        tracing::debug!(
            url = %url,
            template_id = %request.template_id,
            body_bytes = body.len(),
            "sending export request"
        );

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/octet-stream, */*")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    tracing::warn!(url = %url, error = %e, "connection to export service failed");
                } else {
                    tracing::warn!(url = %url, error = %e, "export request failed");
                }
                ExportError
            })?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are not interpreted
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                "export service returned an error status"
            );
            return Err(ExportError);
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to read export response body");
            ExportError
        })?;

        tracing::debug!(url = %url, bytes = bytes.len(), "export response received");
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
