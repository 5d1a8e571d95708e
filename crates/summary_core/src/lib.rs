//! Summary client core: pure request lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod staging;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Submission, DOWNLOAD_FILE_NAME};
pub use msg::Msg;
pub use staging::{StagedDocument, StagingArea};
pub use state::{
    AppState, Classification, DownloadRef, RequestId, RequestStatus, SubmissionFailure,
    SummaryOptions, SummaryRequest, SummaryType, UiStatus,
};
pub use update::{update, VALIDATION_MESSAGE};
pub use view_model::{AppViewModel, DocumentRowView, RequestRowView};
