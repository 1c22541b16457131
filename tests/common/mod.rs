//! Shared utilities for integration tests.

use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::{header, Request};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use report_relay::config::RelayConfig;
use report_relay::http::HttpServer;
use report_relay::relay::InboundForm;

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n\xde\xad\xbe\xef";

/// Relay configuration pointed at `upstream`, with metrics off.
pub fn relay_config(upstream: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.upstream.base_url = upstream.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.observability.metrics_enabled = false;
    config
}

/// In-process relay built exactly as the binary builds it.
#[allow(dead_code)]
pub fn relay_server(config: RelayConfig) -> TestServer {
    let server = HttpServer::new(config).expect("relay server should build");
    TestServer::new(server.router()).expect("test server should start")
}

#[allow(dead_code)]
pub fn pdf_part() -> Part {
    Part::bytes(PDF_BYTES.to_vec()).file_name("experian-2024.pdf")
}

/// A complete, valid upload form.
#[allow(dead_code)]
pub fn valid_form() -> MultipartForm {
    MultipartForm::new()
        .add_part("file", pdf_part())
        .add_text("client_id", "abc123")
        .add_text("bureau", "Experian")
}

/// URL of a local port nothing is listening on.
#[allow(dead_code)]
pub async fn unused_local_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Parse the multipart body the upstream received.
#[allow(dead_code)]
pub async fn decode_forwarded(request: &wiremock::Request) -> InboundForm {
    let content_type = request
        .headers
        .get(header::CONTENT_TYPE)
        .expect("forwarded request should carry a content type")
        .clone();

    let request = Request::builder()
        .method("POST")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(request.body.clone()))
        .unwrap();
    let multipart = Multipart::from_request(request, &()).await.unwrap();
    InboundForm::from_multipart(multipart).await.unwrap()
}
