use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use summary_logging::summary_debug;

use crate::{FailureKind, RequestId, SubmissionRequest, SubmitError};

/// Message used when a failed response carries no usable `detail`.
pub const GENERIC_FAILURE: &str = "Failed to generate summary";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Scheme, host and port of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub endpoint_path: String,
    /// `None` waits forever, matching a browser `fetch` without abort signal.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            endpoint_path: "/example_generate_summary".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl SubmitSettings {
    pub fn endpoint_url(&self) -> Result<Url, SubmitError> {
        let base = Url::parse(&self.base_url)
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))?;
        base.join(&self.endpoint_path)
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Send one submission and return the generated document on success.
    async fn submit(
        &self,
        request_id: RequestId,
        request: &SubmissionRequest,
    ) -> Result<Bytes, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        request_id: RequestId,
        request: &SubmissionRequest,
    ) -> Result<Bytes, SubmitError> {
        let url = self.settings.endpoint_url()?;
        let content = tokio::fs::read(&request.source).await.map_err(|err| {
            SubmitError::new(
                FailureKind::Source,
                format!("{}: {err}", request.source.display()),
            )
        })?;
        let client = self.build_client()?;

        summary_debug!(
            "Submitting request {} file={} bytes={} type={} summary_type={} include_tables={}",
            request_id,
            request.file_name,
            content.len(),
            request.classification,
            request.summary_type,
            request.include_tables
        );

        let form = Form::new()
            .part(
                "file",
                Part::bytes(content).file_name(request.file_name.clone()),
            )
            .text("type", request.classification.clone())
            .text("summary_type", request.summary_type.clone())
            .text("include_tables", request.include_tables.to_string());

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still yields the generic message.
            let body = response.bytes().await.unwrap_or_default();
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                failure_message(&body),
            ));
        }

        response.bytes().await.map_err(map_reqwest_error)
    }
}

/// Best-effort extraction of a `detail` field from an error body.
pub fn failure_message(body: &[u8]) -> String {
    use serde_json::Value;

    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());
    match detail {
        None | Some(Value::Null) | Some(Value::Bool(false)) => GENERIC_FAILURE.to_string(),
        Some(Value::String(text)) if text.is_empty() => GENERIC_FAILURE.to_string(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
