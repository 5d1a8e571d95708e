use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use summary_core::{DownloadRef, Effect, Msg, Submission, SubmissionFailure};
use summary_engine::{
    ArtifactId, ArtifactStore, AtomicFileWriter, EngineEvent, EngineHandle, SubmissionRequest,
    SubmitSettings,
};
use summary_logging::{summary_error, summary_info};

use super::app::Input;

/// Executes core effects against the engine, the artifact store and the disk.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    store: ArtifactStore,
    writer: AtomicFileWriter,
}

impl EffectRunner {
    pub fn new(
        settings: SubmitSettings,
        output_dir: PathBuf,
        input_tx: mpsc::Sender<Input>,
    ) -> io::Result<Self> {
        let store = ArtifactStore::new();
        let engine = EngineHandle::new(settings, store.clone())?;
        Ok(Self::with_engine(engine, store, output_dir, input_tx))
    }

    /// Wires an already running engine to the main loop. `store` must be the
    /// store the engine puts completed summaries into.
    pub fn with_engine(
        engine: EngineHandle,
        store: ArtifactStore,
        output_dir: PathBuf,
        input_tx: mpsc::Sender<Input>,
    ) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
            store,
            writer: AtomicFileWriter::new(output_dir),
        };
        runner.spawn_event_loop(input_tx);
        runner
    }

    /// Runs `effects` in order and returns one line of feedback per effect worth reporting.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitSummary {
                    request_id,
                    submission,
                } => {
                    summary_info!(
                        "SubmitSummary request_id={} file={}",
                        request_id,
                        submission.file_name
                    );
                    self.engine.submit(request_id, to_request(submission));
                    notices.push(format!("Submitted request #{request_id}"));
                }
                Effect::SaveArtifact { download, file_name } => {
                    notices.push(self.save(download, &file_name));
                }
                Effect::ReleaseArtifact { download } => {
                    self.store.release(to_artifact(download));
                    summary_info!(
                        "Released artifact {:?}; {} artifacts ({} bytes) still held",
                        download,
                        self.store.len(),
                        self.store.total_bytes()
                    );
                }
            }
        }
        notices
    }

    fn save(&self, download: DownloadRef, file_name: &str) -> String {
        let Some(content) = self.store.get(to_artifact(download)) else {
            summary_error!("Artifact {:?} is no longer available", download);
            return "Summary is no longer available".to_string();
        };
        match self.writer.write(file_name, &content) {
            Ok(path) => {
                summary_info!("Saved {} bytes to {:?}", content.len(), path);
                format!("Saved summary to {}", path.display())
            }
            Err(err) => {
                summary_error!(
                    "Failed to save summary into {:?}: {}",
                    self.writer.dir(),
                    err
                );
                format!("Could not save summary: {err}")
            }
        }
    }

    /// Forwards engine events to the main loop until the runner is dropped
    /// or the main loop stops listening.
    fn spawn_event_loop(&self, input_tx: mpsc::Sender<Input>) {
        let weak_engine = Arc::downgrade(&self.engine);
        thread::spawn(move || loop {
            // Only hold the engine while waiting, so dropping the runner
            // shuts the engine and its runtime down.
            let Some(engine) = weak_engine.upgrade() else {
                break;
            };
            let event = match engine.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };
            drop(engine);
            match event {
                EngineEvent::SubmissionCompleted { request_id, result } => {
                    let msg = Msg::SubmissionFinished {
                        request_id,
                        result: result
                            .map(|artifact| DownloadRef(artifact.0))
                            .map_err(|err| SubmissionFailure::new(err.message)),
                    };
                    if input_tx.send(Input::Engine(msg)).is_err() {
                        break;
                    }
                }
            }
        });
    }
}

fn to_request(submission: Submission) -> SubmissionRequest {
    SubmissionRequest {
        source: submission.source,
        file_name: submission.file_name,
        classification: submission.classification.as_str().to_string(),
        summary_type: submission.summary_type.as_str().to_string(),
        include_tables: submission.include_tables,
    }
}

fn to_artifact(download: DownloadRef) -> ArtifactId {
    ArtifactId(download.0)
}
