//! Summary engine: HTTP submission, artifact storage and effect execution.
mod artifact;
mod engine;
mod persist;
mod submit;
mod types;

pub use artifact::{ArtifactId, ArtifactStore};
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use submit::{failure_message, ReqwestSubmitter, SubmitSettings, Submitter, GENERIC_FAILURE};
pub use types::{EngineEvent, FailureKind, RequestId, SubmissionRequest, SubmitError};
