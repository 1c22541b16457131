//! Axum handler for `POST /api/reports/upload`.

use std::time::Instant;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::form::InboundForm;
use crate::relay::request::UploadRequest;
use crate::relay::response::relay_response;
use crate::security::headers::forwarded_headers;

/// Validate, forward and relay one upload.
pub async fn upload_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    match relay_upload(&state, &headers, multipart).await {
        Ok(response) => {
            tracing::info!(
                request_id = %request_id,
                status = response.status().as_u16(),
                "Relayed upstream response"
            );
            metrics::record_upload("relayed", response.status().as_u16(), start);
            response
        }
        Err(err) => {
            let status = err.status_code();
            if !matches!(err, RelayError::UpstreamUnreachable { .. }) {
                tracing::warn!(request_id = %request_id, status = status.as_u16(), reason = %err, "Upload rejected");
            }
            metrics::record_upload(err.outcome(), status.as_u16(), start);
            err.into_response()
        }
    }
}

async fn relay_upload(
    state: &AppState,
    headers: &HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, RelayError> {
    if state.use_mocks {
        return Err(RelayError::MocksEnabled);
    }

    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Request is not multipart form data");
        RelayError::InvalidPayload
    })?;
    let form = InboundForm::from_multipart(multipart).await?;
    let upload = UploadRequest::from_form(form)?;

    tracing::debug!(
        client_id = %upload.client_id,
        bureau = %upload.bureau,
        file_name = %upload.file.file_name,
        size = upload.file.data.len(),
        passthrough = upload.passthrough.len(),
        upstream = %state.upstream.upload_url(),
        "Forwarding upload"
    );

    let upstream = state
        .upstream
        .forward(upload.into_outbound(), forwarded_headers(headers))
        .await?;

    Ok(relay_response(upstream))
}
