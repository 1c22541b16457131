//! HTTP client for the upstream reports service.

use std::time::Duration;

use axum::http::HeaderMap;

use crate::config::RelayConfig;
use crate::relay::error::RelayError;
use crate::relay::outbound::OutboundForm;

/// Fixed path of the upload endpoint on the reports service.
pub const UPLOAD_PATH: &str = "/reports/upload";

/// Pooled client bound to one resolved upload URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    upload_url: String,
}

impl UpstreamClient {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .no_proxy()
            .build()?;

        Ok(Self {
            http,
            upload_url: resolve_upload_url(&config.upstream.base_url),
        })
    }

    /// The URL every upload is posted to.
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// POST the form with the given (already allow-listed) headers.
    ///
    /// Any failure before a response head arrives, including timeouts, is
    /// reported as unreachable.
    pub async fn forward(
        &self,
        form: OutboundForm,
        headers: HeaderMap,
    ) -> Result<reqwest::Response, RelayError> {
        self.http
            .post(&self.upload_url)
            .headers(headers)
            .multipart(form.into_multipart())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    upstream = %self.upload_url,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Failed to reach upstream reports service"
                );
                RelayError::UpstreamUnreachable {
                    url: self.upload_url.clone(),
                }
            })
    }
}

/// Join the configured base URL and the upload path.
pub fn resolve_upload_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), UPLOAD_PATH)
}
