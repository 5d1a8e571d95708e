use crate::{Classification, RequestId, RequestStatus, SummaryOptions, SummaryType, UiStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: UiStatus,
    pub message: Option<String>,
    pub documents: Vec<DocumentRowView>,
    pub summary_type: Option<SummaryType>,
    pub options: SummaryOptions,
    pub requests: Vec<RequestRowView>,
    pub generate_enabled: bool,
    pub in_flight: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRowView {
    pub index: usize,
    pub display_name: String,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRowView {
    pub id: RequestId,
    pub status: RequestStatus,
    pub downloadable: bool,
}
