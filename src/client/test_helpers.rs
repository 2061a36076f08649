//! Shared test helpers for building ExportClient instances with stubbed collaborators.

use crate::client::ExportClient;
use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::gateway::ExportGateway;
use crate::payload::ExportRequest;
use crate::sink::DownloadSink;
use crate::types::{DocumentType, Event};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub gateway does on each call
pub(crate) enum GatewayBehavior {
    /// Return these bytes immediately
    Respond(Vec<u8>),
    /// Fail immediately
    Fail,
    /// Wait until released, then return these bytes
    WaitThenRespond(Arc<tokio::sync::Notify>, Vec<u8>),
    /// Sleep, then return these bytes
    Delay(Duration, Vec<u8>),
}

/// Gateway stub that records every request it receives
pub(crate) struct StubGateway {
    behavior: GatewayBehavior,
    pub(crate) requests: Mutex<Vec<(ExportRequest, DocumentType)>>,
    /// Signalled once a call has entered `send`
    pub(crate) entered: Arc<tokio::sync::Notify>,
}

impl StubGateway {
    pub(crate) fn new(behavior: GatewayBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            requests: Mutex::new(Vec::new()),
            entered: Arc::new(tokio::sync::Notify::new()),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ExportGateway for StubGateway {
    async fn send(
        &self,
        request: &ExportRequest,
        document_type: DocumentType,
    ) -> std::result::Result<Vec<u8>, ExportError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), document_type));
        self.entered.notify_one();

        match &self.behavior {
            GatewayBehavior::Respond(bytes) => Ok(bytes.clone()),
            GatewayBehavior::Fail => Err(ExportError),
            GatewayBehavior::WaitThenRespond(release, bytes) => {
                release.notified().await;
                Ok(bytes.clone())
            }
            GatewayBehavior::Delay(delay, bytes) => {
                tokio::time::sleep(*delay).await;
                Ok(bytes.clone())
            }
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Sink that keeps saved files in memory
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) saved: Mutex<Vec<(Vec<u8>, String, DocumentType)>>,
    pub(crate) calls: AtomicUsize,
    pub(crate) fail_with: Mutex<Option<std::io::ErrorKind>>,
}

impl RecordingSink {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DownloadSink for RecordingSink {
    fn save(
        &self,
        bytes: &[u8],
        suggested_base_name: &str,
        document_type: DocumentType,
    ) -> Result<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = *self.fail_with.lock().unwrap() {
            return Err(std::io::Error::new(kind, "disk full").into());
        }
        let file_name = crate::sink::file_name_for(suggested_base_name, document_type)?;
        self.saved
            .lock()
            .unwrap()
            .push((bytes.to_vec(), suggested_base_name.to_string(), document_type));
        Ok(PathBuf::from("/memory").join(file_name))
    }
}

/// Build a client around the given stubs, skipping the catalog fetch
pub(crate) async fn create_test_client(
    gateway: Arc<StubGateway>,
    sink: Arc<RecordingSink>,
) -> ExportClient {
    create_test_client_with_config(Config::default(), gateway, sink).await
}

pub(crate) async fn create_test_client_with_config(
    config: Config,
    gateway: Arc<StubGateway>,
    sink: Arc<RecordingSink>,
) -> ExportClient {
    ExportClient::builder(config)
        .gateway(gateway)
        .sink(sink)
        .without_catalog()
        .build()
        .await
        .unwrap()
}

/// Drain every event currently buffered in the receiver
pub(crate) fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Stage transitions among the given events, in order
pub(crate) fn stages(events: &[Event]) -> Vec<crate::types::ExportStage> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StageChanged { stage } => Some(*stage),
            _ => None,
        })
        .collect()
}
