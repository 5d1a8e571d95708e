use crate::{
    AppState, DownloadRef, Effect, Msg, RequestId, RequestStatus, Submission, SubmissionFailure,
    UiStatus, DOWNLOAD_FILE_NAME,
};

/// Message shown when Generate is triggered without documents or summary type.
pub const VALIDATION_MESSAGE: &str = "Please upload documents and select a summary type";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            if state.staging_mut().add_documents(files) > 0 {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClassificationChanged {
            index,
            classification,
        } => {
            if state
                .staging_mut()
                .set_classification(index, classification)
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DocumentRemoved { index } => {
            if state.staging_mut().remove_document(index).is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SummaryTypeChanged(summary_type) => {
            state.set_summary_type(summary_type);
            state.mark_dirty();
            Vec::new()
        }
        Msg::OptionsChanged(options) => {
            state.set_options(options);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ResetClicked => {
            state.staging_mut().clear_all();
            state.set_summary_type(None);
            state.mark_dirty();
            Vec::new()
        }
        Msg::GenerateClicked { now_ms } => start_generation(&mut state, now_ms),
        Msg::SubmissionFinished { request_id, result } => {
            finish_generation(&mut state, request_id, result);
            Vec::new()
        }
        Msg::DownloadClicked { request_id } => match state
            .request(request_id)
            .and_then(|req| req.download)
        {
            Some(download) => vec![Effect::SaveArtifact {
                download,
                file_name: DOWNLOAD_FILE_NAME.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::ReleaseClicked { request_id } => match state.take_download(request_id) {
            Some(download) => {
                state.mark_dirty();
                vec![Effect::ReleaseArtifact { download }]
            }
            None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_generation(state: &mut AppState, now_ms: u64) -> Vec<Effect> {
    state.mark_dirty();

    // Only the first staged document is submitted; the rest stay staged.
    let submission = match (state.staging().first(), state.summary_type()) {
        (Some(first), Some(summary_type)) => Some(Submission {
            source: first.source().to_path_buf(),
            file_name: first.display_name().to_string(),
            classification: first.classification(),
            summary_type,
            include_tables: state.options().include_tables,
        }),
        _ => None,
    };
    let Some(submission) = submission else {
        state.set_status(UiStatus::Error, Some(VALIDATION_MESSAGE.to_string()));
        return Vec::new();
    };

    let request_id = state.next_request_id(now_ms);
    state.push_request(request_id);
    state.set_status(UiStatus::Processing, None);

    vec![Effect::SubmitSummary {
        request_id,
        submission,
    }]
}

fn finish_generation(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<DownloadRef, SubmissionFailure>,
) {
    match result {
        Ok(download) => {
            if !state.finish_request(request_id, RequestStatus::Complete, Some(download)) {
                return;
            }
            state.staging_mut().clear_all();
            state.set_summary_type(None);
            state.set_status(UiStatus::Idle, None);
        }
        Err(failure) => {
            if !state.finish_request(request_id, RequestStatus::Error, None) {
                return;
            }
            state.set_status(UiStatus::Error, Some(failure.message));
        }
    }
    state.mark_dirty();
}
