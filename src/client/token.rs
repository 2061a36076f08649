//! Exclusive in-progress token.

use crate::types::{Event, ExportStage};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{broadcast, watch};

use super::ExportState;

/// Proof that the holder owns the single export slot
///
/// Released when dropped, so every exit path of an export gives the slot back.
/// An export abandoned mid-flight (its future dropped by a timeout, `select!` or
/// task abort) also leaves the stage back at `Idle`.
#[must_use = "the export slot is released as soon as the token is dropped"]
pub(crate) struct ExportToken {
    flag: Arc<AtomicBool>,
    stage_tx: Arc<watch::Sender<ExportStage>>,
    event_tx: broadcast::Sender<Event>,
}

impl ExportToken {
    /// Take the slot, or `None` if another export holds it
    ///
    /// Never waits: a held slot means the caller is rejected, not queued.
    pub(crate) fn try_acquire(
        state: &ExportState,
        event_tx: &broadcast::Sender<Event>,
    ) -> Option<Self> {
        state
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(&state.in_progress),
                stage_tx: Arc::clone(&state.stage_tx),
                event_tx: event_tx.clone(),
            })
    }
}

impl Drop for ExportToken {
    fn drop(&mut self) {
        let previous = self.stage_tx.send_replace(ExportStage::Idle);
        if previous != ExportStage::Idle {
            tracing::warn!(stage = ?previous, "export abandoned before completion");
            self.event_tx
                .send(Event::StageChanged {
                    stage: ExportStage::Idle,
                })
                .ok();
        }
        self.flag.store(false, Ordering::SeqCst);
    }
}
