use std::fmt;
use std::path::PathBuf;

use crate::ArtifactId;

pub type RequestId = u64;

/// Everything the backend receives for one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub source: PathBuf,
    pub file_name: String,
    pub classification: String,
    pub summary_type: String,
    pub include_tables: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted {
        request_id: RequestId,
        result: Result<ArtifactId, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True for failures where the backend answered with a non-success status.
    pub fn is_service_error(&self) -> bool {
        matches!(self.kind, FailureKind::HttpStatus(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The staged file could not be read.
    Source,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Source => write!(f, "unreadable source file"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
