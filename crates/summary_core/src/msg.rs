use std::path::PathBuf;

use crate::{Classification, DownloadRef, RequestId, SubmissionFailure, SummaryOptions, SummaryType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files in the file input.
    FilesSelected(Vec<PathBuf>),
    /// User changed the classification of the staged document at `index`.
    ClassificationChanged {
        index: usize,
        classification: Classification,
    },
    /// User removed the staged document at `index`.
    DocumentRemoved { index: usize },
    /// User picked a summary type (`None` = back to "Select a summary type").
    SummaryTypeChanged(Option<SummaryType>),
    /// User toggled summary options.
    OptionsChanged(SummaryOptions),
    /// User clicked Reset.
    ResetClicked,
    /// User clicked Generate. `now_ms` is the wall clock in milliseconds since the Unix epoch.
    GenerateClicked { now_ms: u64 },
    /// Engine finished the submission for `request_id`.
    SubmissionFinished {
        request_id: RequestId,
        result: Result<DownloadRef, SubmissionFailure>,
    },
    /// User asked to save the summary produced by `request_id`.
    DownloadClicked { request_id: RequestId },
    /// User is done with the summary produced by `request_id`.
    ReleaseClicked { request_id: RequestId },
    /// Input that changes nothing, such as a blank terminal line.
    NoOp,
}
