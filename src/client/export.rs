//! The per-export state machine.
//!
//! `Idle → Building → Sending → {Saving → Idle | Failed → Idle}`
//!
//! Building and saving are synchronous; the gateway call is the only await
//! point. The in-progress token is taken before Building and given back after
//! the final transition to Idle. If the export future is dropped part way, the
//! token's drop puts the stage back to Idle.

use crate::error::{Error, ExportError, Result};
use crate::payload;
use crate::types::{DocumentType, Event, ExportForm, ExportOutcome, ExportResult, ExportStage};

use super::ExportClient;
use super::token::ExportToken;

impl ExportClient {
    /// Export one document and save it locally
    ///
    /// Builds the payload for `(document_type, form.template_id, form.title)`,
    /// sends it once, and saves the returned bytes as
    /// `form.file_name.<extension>` in the output directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] if another export is running (nothing is sent)
    /// - [`Error::Export`] for any failure of the service exchange, including timeout
    /// - [`Error::InvalidFileName`] if `form.file_name` cannot name a file (nothing is sent)
    /// - file errors from the sink ([`Error::Io`], [`Error::FileCollision`])
    ///
    /// Every error leaves the client back in [`ExportStage::Idle`], ready for another try.
    pub async fn export(
        &self,
        form: &ExportForm,
        document_type: DocumentType,
    ) -> Result<ExportOutcome> {
        let Some(_token) = ExportToken::try_acquire(&self.state, &self.event_tx) else {
            tracing::warn!(
                document_type = %document_type,
                "export rejected, another export is in progress"
            );
            return Err(Error::Busy);
        };

        self.set_stage(ExportStage::Building);
        if let Err(e) = crate::sink::file_name_for(&form.file_name, document_type) {
            return Err(self.fail(document_type, e));
        }
        let request = payload::build(document_type, &form.template_id, &form.title);

        self.set_stage(ExportStage::Sending);
        let timeout = self.config.service.request_timeout;
        let sent = match tokio::time::timeout(
            timeout,
            self.pipeline.gateway.send(&request, document_type),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout = ?timeout,
                    document_type = %document_type,
                    "export timed out"
                );
                Err(ExportError)
            }
        };
        drop(request);

        let result = match sent {
            Ok(bytes) => ExportResult {
                bytes,
                base_name: form.file_name.clone(),
                document_type,
            },
            Err(e) => return Err(self.fail(document_type, Error::Export(e))),
        };

        self.set_stage(ExportStage::Saving);
        let path = match self.pipeline.sink.save(
            &result.bytes,
            &result.base_name,
            result.document_type,
        ) {
            Ok(path) => path,
            Err(e) => return Err(self.fail(document_type, e)),
        };

        let outcome = ExportOutcome {
            document_type,
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            bytes_written: result.bytes.len() as u64,
            path,
            saved_at: chrono::Utc::now(),
        };

        self.event_tx
            .send(Event::ExportSaved {
                document_type,
                path: outcome.path.clone(),
            })
            .ok();
        self.set_stage(ExportStage::Idle);

        tracing::info!(
            document_type = %document_type,
            template_id = %form.template_id,
            file = %outcome.file_name,
            bytes = outcome.bytes_written,
            "export complete"
        );
        Ok(outcome)
    }

    /// Record a failure: Failed, then straight back to Idle
    fn fail(&self, document_type: DocumentType, error: Error) -> Error {
        self.set_stage(ExportStage::Failed);
        tracing::warn!(document_type = %document_type, error = %error, "export failed");
        self.event_tx
            .send(Event::ExportFailed {
                document_type,
                message: error.user_message(),
            })
            .ok();
        self.set_stage(ExportStage::Idle);
        error
    }

    fn set_stage(&self, stage: ExportStage) {
        let previous = self.state.stage_tx.send_replace(stage);
        tracing::debug!(from = ?previous, to = ?stage, "export stage changed");
        self.event_tx.send(Event::StageChanged { stage }).ok();
    }
}
