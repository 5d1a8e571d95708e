use std::fmt;

use crate::staging::StagingArea;
use crate::view_model::{AppViewModel, DocumentRowView, RequestRowView};

/// Creation-time id of a generation attempt (milliseconds since the Unix epoch).
pub type RequestId = u64;

/// Opaque, locally resolvable pointer to a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DownloadRef(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    #[default]
    Unknown,
    Report,
    Presentation,
    Spreadsheet,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Unknown,
        Classification::Report,
        Classification::Presentation,
        Classification::Spreadsheet,
    ];

    /// Value sent in the `type` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Unknown => "Unknown",
            Classification::Report => "Report",
            Classification::Presentation => "Presentation",
            Classification::Spreadsheet => "Spreadsheet",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryType {
    Executive,
    Technical,
    Financial,
}

impl SummaryType {
    pub const ALL: [SummaryType; 3] = [
        SummaryType::Executive,
        SummaryType::Technical,
        SummaryType::Financial,
    ];

    /// Value sent in the `summary_type` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryType::Executive => "Executive",
            SummaryType::Technical => "Technical",
            SummaryType::Financial => "Financial",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub include_tables: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            include_tables: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Processing,
    Complete,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub id: RequestId,
    pub status: RequestStatus,
    pub download: Option<DownloadRef>,
}

/// Coarse status of the most recent lifecycle action.
///
/// `Uploading` and `Complete` are never entered by the lifecycle itself; a
/// successful generation returns straight to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    Uploading,
    Processing,
    Complete,
    Error,
}

/// Why a submission ended in `Error`. Only the message survives into state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub message: String,
}

impl SubmissionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    staging: StagingArea,
    summary_type: Option<SummaryType>,
    options: SummaryOptions,
    requests: Vec<SummaryRequest>,
    status: UiStatus,
    message: Option<String>,
    last_request_id: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let documents = self
            .staging
            .iter()
            .enumerate()
            .map(|(index, doc)| DocumentRowView {
                index,
                display_name: doc.display_name().to_string(),
                classification: doc.classification(),
            })
            .collect();
        let requests = self
            .requests
            .iter()
            .map(|req| RequestRowView {
                id: req.id,
                status: req.status,
                downloadable: req.download.is_some(),
            })
            .collect();

        AppViewModel {
            status: self.status,
            message: self.message.clone(),
            documents,
            summary_type: self.summary_type,
            options: self.options,
            requests,
            generate_enabled: self.generate_enabled(),
            in_flight: self.in_flight(),
            dirty: self.dirty,
        }
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn summary_type(&self) -> Option<SummaryType> {
        self.summary_type
    }

    pub fn options(&self) -> SummaryOptions {
        self.options
    }

    pub fn requests(&self) -> &[SummaryRequest] {
        &self.requests
    }

    pub fn request(&self, id: RequestId) -> Option<&SummaryRequest> {
        self.requests.iter().find(|req| req.id == id)
    }

    pub fn status(&self) -> UiStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Mirrors the Generate button: only the last global status blocks it,
    /// not the number of requests still processing.
    pub fn generate_enabled(&self) -> bool {
        self.status != UiStatus::Processing
            && !self.staging.is_empty()
            && self.summary_type.is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.requests
            .iter()
            .filter(|req| req.status == RequestStatus::Processing)
            .count()
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    pub(crate) fn set_summary_type(&mut self, summary_type: Option<SummaryType>) {
        self.summary_type = summary_type;
    }

    pub(crate) fn set_options(&mut self, options: SummaryOptions) {
        self.options = options;
    }

    pub(crate) fn set_status(&mut self, status: UiStatus, message: Option<String>) {
        self.status = status;
        if message.is_some() {
            self.message = message;
        }
    }

    /// Allocates a fresh id from `now_ms`; never hands out the same id twice.
    pub(crate) fn next_request_id(&mut self, now_ms: u64) -> RequestId {
        let id = match self.last_request_id {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last_request_id = Some(id);
        id
    }

    pub(crate) fn push_request(&mut self, id: RequestId) {
        self.requests.push(SummaryRequest {
            id,
            status: RequestStatus::Processing,
            download: None,
        });
    }

    /// Moves a processing request to its terminal status. Returns false if
    /// the id is unknown or the request already finished.
    pub(crate) fn finish_request(
        &mut self,
        id: RequestId,
        status: RequestStatus,
        download: Option<DownloadRef>,
    ) -> bool {
        match self
            .requests
            .iter_mut()
            .find(|req| req.id == id && req.status == RequestStatus::Processing)
        {
            Some(req) => {
                req.status = status;
                req.download = download;
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_download(&mut self, id: RequestId) -> Option<DownloadRef> {
        self.requests
            .iter_mut()
            .find(|req| req.id == id)
            .and_then(|req| req.download.take())
    }
}
