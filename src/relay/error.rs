//! Relay error taxonomy and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way the relay can answer locally instead of relaying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Uploads are switched off while the backend is simulated.
    #[error("Report uploads are disabled while mocks are enabled.")]
    MocksEnabled,

    /// Body is not readable multipart form data.
    #[error("Invalid upload payload.")]
    InvalidPayload,

    #[error("A PDF file is required for upload.")]
    MissingFile,

    #[error("A client identifier must be provided.")]
    MissingClientId,

    #[error("A credit bureau selection is required.")]
    MissingBureau,

    /// Transport-level failure talking to the upstream (includes timeouts).
    #[error("Unable to reach the reports service at {url}. Ensure the backend is running and accessible.")]
    UpstreamUnreachable { url: String },
}

/// Wire shape of every locally produced error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MocksEnabled => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::InvalidPayload
            | RelayError::MissingFile
            | RelayError::MissingClientId
            | RelayError::MissingBureau => StatusCode::BAD_REQUEST,
            RelayError::UpstreamUnreachable { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MocksEnabled => "mocks_enabled",
            RelayError::UpstreamUnreachable { .. } => "unreachable",
            _ => "rejected",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(RelayError::MocksEnabled.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(RelayError::InvalidPayload.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MissingBureau.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::UpstreamUnreachable { url: "http://x/reports/upload".into() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn unreachable_message_names_the_url() {
        let err = RelayError::UpstreamUnreachable {
            url: "http://10.0.0.9:8000/reports/upload".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to reach the reports service at http://10.0.0.9:8000/reports/upload. \
             Ensure the backend is running and accessible."
        );
    }

    #[tokio::test]
    async fn renders_detail_json() {
        let response = RelayError::MissingClientId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "A client identifier must be provided.");
    }
}
