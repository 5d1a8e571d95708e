use std::path::PathBuf;

use crate::{Classification, DownloadRef, RequestId, SummaryType};

/// File name a downloaded summary is saved under.
pub const DOWNLOAD_FILE_NAME: &str = "summary.docx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one multipart submission for the given request.
    SubmitSummary {
        request_id: RequestId,
        submission: Submission,
    },
    /// Write the artifact behind `download` to disk.
    SaveArtifact {
        download: DownloadRef,
        file_name: String,
    },
    /// Drop the artifact behind `download`; the reference is dead afterwards.
    ReleaseArtifact { download: DownloadRef },
}

/// Snapshot of everything the backend receives for one generation attempt.
///
/// Only the first staged document is ever packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub source: PathBuf,
    pub file_name: String,
    pub classification: Classification,
    pub summary_type: SummaryType,
    pub include_tables: bool,
}
