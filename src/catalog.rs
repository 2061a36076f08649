//! Template catalog retrieval.
//!
//! The catalog is read once at startup. Only excel templates are surfaced; the
//! others are fetched with the rest and dropped.

use crate::config::ServiceConfig;
use crate::error::{CATALOG_UNAVAILABLE_MESSAGE, CatalogFetchError, Error, Result};
use crate::types::{DocumentType, Event, TemplateDescriptor};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Response envelope used by the generation service
///
/// `data` is `null` when the service has no templates at all.
#[derive(Debug, Deserialize)]
struct TemplateListResponse {
    #[serde(default)]
    data: Option<Vec<TemplateDescriptor>>,
}

/// Keep only the templates this client can use, in their original order
pub fn filter_usable(templates: Vec<TemplateDescriptor>) -> Vec<TemplateDescriptor> {
    let usable = DocumentType::Excel.as_str();
    templates
        .into_iter()
        .filter(|t| t.template_type == usable)
        .collect()
}

/// Fetches the list of selectable templates from the generation service
pub struct TemplateCatalogClient {
    /// HTTP client for the catalog request
    http_client: reqwest::Client,

    /// Catalog endpoint
    url: String,

    /// Where the "catalog unavailable" advisory is sent
    event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl TemplateCatalogClient {
    /// Create a catalog client for the configured service
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(
        service: &ServiceConfig,
        event_tx: tokio::sync::broadcast::Sender<Event>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(service.catalog_timeout)
            .user_agent(service.user_agent.as_str())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: service.templates_url(),
            event_tx,
        })
    }

    /// Fetch the usable templates, degrading to an empty list on failure
    ///
    /// A failure is logged and broadcast as [`Event::CatalogUnavailable`]; it never
    /// propagates, so exports stay available without a catalog.
    pub async fn fetch_templates(&self) -> Vec<TemplateDescriptor> {
        match self.try_fetch_templates().await {
            Ok(templates) => {
                self.event_tx
                    .send(Event::CatalogLoaded {
                        count: templates.len(),
                    })
                    .ok();
                templates
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "template catalog unavailable");
                self.event_tx
                    .send(Event::CatalogUnavailable {
                        message: CATALOG_UNAVAILABLE_MESSAGE.to_string(),
                    })
                    .ok();
                Vec::new()
            }
        }
    }

    /// Fetch the usable templates, reporting why it failed
    ///
    /// Performs exactly one GET; there is no retry.
    pub async fn try_fetch_templates(
        &self,
    ) -> std::result::Result<Vec<TemplateDescriptor>, CatalogFetchError> {
        debug!(url = %self.url, "fetching template catalog");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogFetchError::Request {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogFetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogFetchError::Request {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let envelope: TemplateListResponse = serde_json::from_slice(&body)
            .map_err(|e| CatalogFetchError::Decode(e.to_string()))?;

        let all = envelope.data.unwrap_or_default();
        let total = all.len();
        let usable = filter_usable(all);
        info!(total, usable = usable.len(), "template catalog loaded");

        Ok(usable)
    }
}
