use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use summary_logging::{summary_info, summary_warn};

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{ArtifactStore, EngineEvent, RequestId, SubmissionRequest};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: SubmissionRequest,
    },
}

/// Runs submissions on a background tokio runtime.
///
/// Every submission gets its own task, so overlapping submissions proceed
/// concurrently and may complete in any order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings, store: ArtifactStore) -> io::Result<Self> {
        Self::with_submitter(Arc::new(ReqwestSubmitter::new(settings)), store)
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>, store: ArtifactStore) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("summary-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let submitter = submitter.clone();
                    let store = store.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(submitter.as_ref(), &store, command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn submit(&self, request_id: RequestId, request: SubmissionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let Ok(event_rx) = self.event_rx.lock() else {
            return Err(RecvTimeoutError::Disconnected);
        };
        event_rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    store: &ArtifactStore,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            let result = submitter
                .submit(request_id, &request)
                .await
                .map(|content| {
                    let size = content.len();
                    let artifact = store.acquire(content);
                    summary_info!(
                        "Request {} complete: artifact {:?} ({} bytes)",
                        request_id,
                        artifact,
                        size
                    );
                    artifact
                });
            if let Err(err) = &result {
                summary_warn!("Request {} failed ({}): {}", request_id, err.kind, err);
            }
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { request_id, result });
        }
    }
}
