use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the relay's upload endpoint.
pub const UPLOAD_ROUTE: &str = "/api/reports/upload";

/// Summary the reports service returns for a stored upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: String,
    pub filename: String,
    pub pages: u32,
    pub text_len: u64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bureau: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub has_parsed_data: bool,
}

/// A document to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn pdf(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: "application/pdf".to_string(),
            data,
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    /// The relay could not be contacted at all.
    #[error("Unable to reach the upload relay at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The relay (or the reports service behind it) refused the upload.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Failed to parse upload response.")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Invalid upload request: {0}")]
    Request(#[source] reqwest::Error),
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self::with_client(Client::new(), relay_url)
    }

    pub fn with_client(client: Client, relay_url: &str) -> Self {
        Self {
            client,
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload a report. The identifier is sent under both `client_id` and
    /// the legacy `user_id` name.
    pub async fn upload_report(
        &self,
        file: UploadFile,
        client_id: &str,
        bureau: &str,
    ) -> Result<ReportSummary, UploadError> {
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(UploadError::Request)?;

        let form = Form::new()
            .part("file", part)
            .text("client_id", client_id.to_string())
            .text("user_id", client_id.to_string())
            .text("bureau", bureau.to_string());

        let url = format!("{}{}", self.relay_url, UPLOAD_ROUTE);
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| UploadError::Unreachable { url, source })?;

        let status = resp.status();
        if !status.is_success() {
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status,
                message: error_message(status, &content_type, &body),
            });
        }

        resp.json::<ReportSummary>()
            .await
            .map_err(UploadError::InvalidResponse)
    }
}

/// Best human-readable message for a failed upload response.
///
/// JSON bodies use the first non-null value among `detail`, `message` and
/// `error`, which must be a non-blank string; other bodies are used as text.
/// Anything else falls back to the status code.
pub fn error_message(status: StatusCode, content_type: &str, body: &str) -> String {
    let fallback = || format!("Upload failed with status {}", status.as_u16());

    if content_type.contains("application/json") {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return fallback();
        };
        return ["detail", "message", "error"]
            .iter()
            .find_map(|key| value.get(key).filter(|v| !v.is_null()))
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(fallback);
    }

    if body.trim().is_empty() {
        fallback()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_detail_is_preferred() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            "application/json",
            r#"{"detail": "A credit bureau selection is required."}"#,
        );
        assert_eq!(msg, "A credit bureau selection is required.");
    }

    #[test]
    fn falls_back_through_message_and_error() {
        let msg = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            "application/json; charset=utf-8",
            r#"{"error": "boom"}"#,
        );
        assert_eq!(msg, "boom");
    }

    #[test]
    fn blank_json_detail_uses_status() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "application/json", r#"{"detail": "  "}"#);
        assert_eq!(msg, "Upload failed with status 502");
    }

    #[test]
    fn blank_detail_does_not_fall_through_to_message() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            "application/json",
            r#"{"detail": "  ", "message": "x"}"#,
        );
        assert_eq!(msg, "Upload failed with status 400");
    }

    #[test]
    fn non_string_detail_uses_status() {
        let msg = error_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            "application/json",
            r#"{"detail": 5, "message": "x"}"#,
        );
        assert_eq!(msg, "Upload failed with status 422");
    }

    #[test]
    fn null_detail_falls_through_to_message() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            "application/json",
            r#"{"detail": null, "message": "x"}"#,
        );
        assert_eq!(msg, "x");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let msg = error_message(StatusCode::PAYLOAD_TOO_LARGE, "text/plain", "File too large (limit 10MB)");
        assert_eq!(msg, "File too large (limit 10MB)");
    }

    #[test]
    fn empty_body_uses_status() {
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, "", ""),
            "Upload failed with status 503"
        );
    }
}
