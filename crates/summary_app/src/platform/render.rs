use std::fmt::Write;

use summary_core::{AppViewModel, RequestRowView, RequestStatus, UiStatus};

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let status = status_label(view.status);
    match (&view.message, view.status) {
        (Some(message), UiStatus::Error) => {
            let _ = writeln!(out, "Status: {status} | {message}");
        }
        _ if view.in_flight > 0 => {
            let _ = writeln!(out, "Status: {status} | {} in flight", view.in_flight);
        }
        _ => {
            let _ = writeln!(out, "Status: {status}");
        }
    }

    if view.documents.is_empty() {
        out.push_str("Documents: (none staged)\n");
    } else {
        out.push_str("Documents:\n");
        for doc in &view.documents {
            let _ = writeln!(
                out,
                "  {}. {} [{}]",
                doc.index + 1,
                doc.display_name,
                doc.classification
            );
        }
    }

    let summary_type = view
        .summary_type
        .map_or("(select a summary type)", |summary_type| {
            summary_type.as_str()
        });
    let _ = writeln!(
        out,
        "Summary type: {summary_type} | Include tables: {} | Generate: {}",
        if view.options.include_tables { "yes" } else { "no" },
        if view.generate_enabled {
            "ready"
        } else {
            "disabled"
        }
    );

    if !view.requests.is_empty() {
        out.push_str("Requests:\n");
        for request in &view.requests {
            let _ = writeln!(out, "  {}", format_request_row(request));
        }
    }

    out
}

fn format_request_row(request: &RequestRowView) -> String {
    let status = match request.status {
        RequestStatus::Processing => "processing",
        RequestStatus::Complete => "complete",
        RequestStatus::Error => "error",
    };
    match (request.status, request.downloadable) {
        (RequestStatus::Complete, true) => {
            format!("[#{}] {status} (download available)", request.id)
        }
        (RequestStatus::Complete, false) => format!("[#{}] {status} (released)", request.id),
        _ => format!("[#{}] {status}", request.id),
    }
}

fn status_label(status: UiStatus) -> &'static str {
    match status {
        UiStatus::Idle => "Idle",
        UiStatus::Uploading => "Uploading",
        UiStatus::Processing => "Processing...",
        UiStatus::Complete => "Complete",
        UiStatus::Error => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summary_core::{Classification, DocumentRowView, SummaryOptions, SummaryType};

    #[test]
    fn renders_documents_and_request_history() {
        let view = AppViewModel {
            status: UiStatus::Processing,
            documents: vec![DocumentRowView {
                index: 0,
                display_name: "q3.pdf".to_string(),
                classification: Classification::Report,
            }],
            summary_type: Some(SummaryType::Financial),
            options: SummaryOptions::default(),
            requests: vec![
                RequestRowView {
                    id: 10,
                    status: RequestStatus::Complete,
                    downloadable: true,
                },
                RequestRowView {
                    id: 11,
                    status: RequestStatus::Processing,
                    downloadable: false,
                },
            ],
            in_flight: 1,
            ..AppViewModel::default()
        };

        let text = render(&view);
        assert!(text.contains("Status: Processing... | 1 in flight"));
        assert!(text.contains("  1. q3.pdf [Report]"));
        assert!(text.contains("Summary type: Financial | Include tables: yes | Generate: disabled"));
        assert!(text.contains("  [#10] complete (download available)\n"));
        assert!(text.contains("[#11] processing"));
    }

    #[test]
    fn error_status_shows_message() {
        let view = AppViewModel {
            status: UiStatus::Error,
            message: Some("bad file".to_string()),
            ..AppViewModel::default()
        };

        let text = render(&view);
        assert!(text.starts_with("Status: Error | bad file\n"));
        assert!(text.contains("Documents: (none staged)"));
        assert!(text.contains("(select a summary type)"));
    }
}
