use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use summary_engine::{
    failure_message, FailureKind, ReqwestSubmitter, SubmissionRequest, SubmitSettings, Submitter,
    GENERIC_FAILURE,
};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/example_generate_summary";

fn staged_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content).expect("write temp file");
    file
}

fn request_for(file: &NamedTempFile) -> SubmissionRequest {
    SubmissionRequest {
        source: file.path().to_path_buf(),
        file_name: "q3-report.pdf".to_string(),
        classification: "Report".to_string(),
        summary_type: "Executive".to_string(),
        include_tables: true,
    }
}

fn settings_for(server: &MockServer) -> SubmitSettings {
    SubmitSettings {
        base_url: server.uri(),
        ..SubmitSettings::default()
    }
}

/// Value of a text field in a multipart body.
fn form_field(body: &[u8], name: &str) -> Option<String> {
    let body = String::from_utf8_lossy(body);
    let marker = format!("name=\"{name}\"");
    let start = body.find(&marker)?;
    let rest = &body[start..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let value = &rest[value_start..];
    let value_end = value.find("\r\n")?;
    Some(value[..value_end].to_string())
}

#[tokio::test]
async fn submits_multipart_form_and_returns_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"PK\x03\x04docx".to_vec(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let file = staged_file(b"quarterly numbers");
    let submitter = ReqwestSubmitter::new(settings_for(&server));

    let body = submitter
        .submit(1, &request_for(&file))
        .await
        .expect("submit ok");
    assert_eq!(body.as_ref(), b"PK\x03\x04docx");

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    let sent = &received[0];
    let content_type = sent
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    assert_eq!(form_field(&sent.body, "type").as_deref(), Some("Report"));
    assert_eq!(
        form_field(&sent.body, "summary_type").as_deref(),
        Some("Executive")
    );
    assert_eq!(
        form_field(&sent.body, "include_tables").as_deref(),
        Some("true")
    );
    let raw = String::from_utf8_lossy(&sent.body);
    assert!(raw.contains("filename=\"q3-report.pdf\""));
    assert!(raw.contains("quarterly numbers"));
}

#[tokio::test]
async fn include_tables_false_is_sent_as_literal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"doc".to_vec()))
        .mount(&server)
        .await;

    let file = staged_file(b"x");
    let request = SubmissionRequest {
        include_tables: false,
        ..request_for(&file)
    };
    ReqwestSubmitter::new(settings_for(&server))
        .submit(2, &request)
        .await
        .expect("submit ok");

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(
        form_field(&received[0].body, "include_tables").as_deref(),
        Some("false")
    );
}

#[tokio::test]
async fn service_error_uses_detail_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(422).set_body_raw(r#"{"detail":"bad file"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let file = staged_file(b"x");
    let err = ReqwestSubmitter::new(settings_for(&server))
        .submit(3, &request_for(&file))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.message, "bad file");
    assert!(err.is_service_error());
}

#[tokio::test]
async fn service_error_without_json_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let file = staged_file(b"x");
    let err = ReqwestSubmitter::new(settings_for(&server))
        .submit(4, &request_for(&file))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, GENERIC_FAILURE);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let file = staged_file(b"x");
    let settings = SubmitSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        ..SubmitSettings::default()
    };

    let err = ReqwestSubmitter::new(settings)
        .submit(5, &request_for(&file))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.message.is_empty());
    assert!(!err.is_service_error());
}

#[tokio::test]
async fn configured_timeout_fires_on_slow_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_bytes(b"late".to_vec()),
        )
        .mount(&server)
        .await;

    let file = staged_file(b"x");
    let settings = SubmitSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..settings_for(&server)
    };

    let err = ReqwestSubmitter::new(settings)
        .submit(6, &request_for(&file))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn missing_source_file_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = SubmissionRequest {
        source: PathBuf::from("definitely/not/here.pdf"),
        file_name: "here.pdf".to_string(),
        classification: "Unknown".to_string(),
        summary_type: "Financial".to_string(),
        include_tables: true,
    };

    let err = ReqwestSubmitter::new(settings_for(&server))
        .submit(7, &request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Source);
    assert!(err.message.contains("here.pdf"));
}

#[test]
fn failure_message_variants() {
    assert_eq!(failure_message(br#"{"detail":"bad file"}"#), "bad file");
    assert_eq!(failure_message(br#"{"detail":""}"#), GENERIC_FAILURE);
    assert_eq!(failure_message(br#"{"detail":null}"#), GENERIC_FAILURE);
    assert_eq!(failure_message(br#"{"error":"x"}"#), GENERIC_FAILURE);
    assert_eq!(failure_message(b""), GENERIC_FAILURE);
    assert_eq!(
        failure_message(br#"{"detail":[{"loc":["body","file"],"msg":"field required"}]}"#),
        r#"[{"loc":["body","file"],"msg":"field required"}]"#
    );
}

#[test]
fn endpoint_joins_base_url() {
    let settings = SubmitSettings::default();
    assert_eq!(
        settings.endpoint_url().expect("valid url").as_str(),
        "http://localhost:8000/example_generate_summary"
    );

    let broken = SubmitSettings {
        base_url: "not a url".to_string(),
        ..SubmitSettings::default()
    };
    assert_eq!(broken.endpoint_url().unwrap_err().kind, FailureKind::InvalidUrl);
}
