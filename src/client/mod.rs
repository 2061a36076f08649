//! Export client split into focused submodules.
//!
//! - [`export`] - The per-export state machine (build, send, save)
//! - [`token`] - The exclusive in-progress token

mod export;
mod token;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::catalog::TemplateCatalogClient;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{ExportGateway, HttpExportGateway};
use crate::sink::{DirectorySink, DownloadSink};
use crate::types::{Event, ExportStage, TemplateDescriptor};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Pluggable collaborators of the export pipeline
#[derive(Clone)]
pub(crate) struct Pipeline {
    /// Network exchange with the generation service (trait object for stubbing)
    pub(crate) gateway: Arc<dyn ExportGateway>,
    /// Local persistence of the returned bytes
    pub(crate) sink: Arc<dyn DownloadSink>,
}

/// Export state shared by all clones of the client
#[derive(Clone)]
pub(crate) struct ExportState {
    /// Held from entering Building until leaving Saving or Failed
    pub(crate) in_progress: Arc<AtomicBool>,
    /// Current stage, observable without subscribing to events
    pub(crate) stage_tx: Arc<tokio::sync::watch::Sender<ExportStage>>,
}

/// Main client instance (cloneable - all fields are Arc-wrapped)
///
/// Construction fetches the template catalog once; the resulting list is fixed
/// for the lifetime of the client.
#[derive(Clone)]
pub struct ExportClient {
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Usable templates, fetched at startup
    pub(crate) templates: Arc<Vec<TemplateDescriptor>>,
    /// Gateway and sink
    pub(crate) pipeline: Pipeline,
    /// Busy token and stage
    pub(crate) state: ExportState,
}

impl ExportClient {
    /// Create a client with the HTTP gateway and a directory sink from `config`
    ///
    /// Fetches the template catalog. A catalog failure is not an error: the client
    /// starts with an empty template list and an [`Event::CatalogUnavailable`] is
    /// emitted (subscribe through [`ExportClient::builder`] to observe it).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an HTTP client cannot be built.
    pub async fn new(config: Config) -> Result<Self> {
        Self::builder(config).build().await
    }

    /// Start building a client with custom collaborators
    pub fn builder(config: Config) -> ExportClientBuilder {
        ExportClientBuilder {
            config,
            gateway: None,
            sink: None,
            event_tx: None,
            fetch_catalog: true,
        }
    }

    /// Subscribe to client events
    ///
    /// Only events sent after this call are received.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Templates available for selection (excel only)
    pub fn templates(&self) -> &[TemplateDescriptor] {
        &self.templates
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Current export stage
    pub fn stage(&self) -> ExportStage {
        *self.state.stage_tx.borrow()
    }

    /// Whether an export is currently running
    pub fn is_busy(&self) -> bool {
        self.state
            .in_progress
            .load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Builder for [`ExportClient`]
pub struct ExportClientBuilder {
    config: Config,
    gateway: Option<Arc<dyn ExportGateway>>,
    sink: Option<Arc<dyn DownloadSink>>,
    event_tx: Option<tokio::sync::broadcast::Sender<Event>>,
    fetch_catalog: bool,
}

impl ExportClientBuilder {
    /// Use a custom gateway instead of [`HttpExportGateway`]
    pub fn gateway(mut self, gateway: Arc<dyn ExportGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Use a custom sink instead of [`DirectorySink`]
    pub fn sink(mut self, sink: Arc<dyn DownloadSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use an existing event channel, so startup events can be observed
    pub fn event_sender(mut self, event_tx: tokio::sync::broadcast::Sender<Event>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Skip the startup catalog fetch and start with no templates
    pub fn without_catalog(mut self) -> Self {
        self.fetch_catalog = false;
        self
    }

    /// Validate the configuration, fetch the catalog and build the client
    pub async fn build(self) -> Result<ExportClient> {
        let ExportClientBuilder {
            config,
            gateway,
            sink,
            event_tx,
            fetch_catalog,
        } = self;

        config.validate()?;

        let event_tx = match event_tx {
            Some(tx) => tx,
            None => tokio::sync::broadcast::channel(config.event_capacity).0,
        };

        let gateway: Arc<dyn ExportGateway> = match gateway {
            Some(gateway) => gateway,
            None => Arc::new(HttpExportGateway::new(&config.service)?),
        };
        let sink: Arc<dyn DownloadSink> = match sink {
            Some(sink) => sink,
            None => Arc::new(DirectorySink::from_config(&config.output)),
        };

        let templates = if fetch_catalog {
            TemplateCatalogClient::new(&config.service, event_tx.clone())?
                .fetch_templates()
                .await
        } else {
            Vec::new()
        };

        tracing::info!(
            base_url = %config.service.base_url,
            gateway = gateway.name(),
            templates = templates.len(),
            "export client ready"
        );

        let (stage_tx, _stage_rx) = tokio::sync::watch::channel(ExportStage::Idle);

        Ok(ExportClient {
            event_tx,
            config: Arc::new(config),
            templates: Arc::new(templates),
            pipeline: Pipeline { gateway, sink },
            state: ExportState {
                in_progress: Arc::new(AtomicBool::new(false)),
                stage_tx: Arc::new(stage_tx),
            },
        })
    }
}
