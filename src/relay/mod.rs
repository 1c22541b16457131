//! Upload relay subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/reports/upload (multipart)
//!     → handler.rs   gate 1: mock mode
//!     → form.rs      gate 2: multipart parses
//!     → request.rs   gates 3-5: file, client identifier, bureau
//!     → outbound.rs  canonical + legacy id, bureau, passthrough, file
//!     → upstream.rs  POST {base_url}/reports/upload (authorization, cookie)
//!     → response.rs  status + content-type + streamed body
//! ```
//!
//! # Design Decisions
//! - Stateless: every invocation is independent
//! - Local failures never touch the network and always answer `{"detail": ...}`
//! - Upstream responses are relayed verbatim, error statuses included
//! - No retries; the caller owns retry policy

pub mod error;
pub mod form;
pub mod handler;
pub mod outbound;
pub mod request;
pub mod response;
pub mod upstream;

pub use error::{ErrorBody, RelayError};
pub use form::{FormEntry, InboundForm, UploadedFile};
pub use handler::upload_report;
pub use outbound::OutboundForm;
pub use request::UploadRequest;
pub use upstream::{UpstreamClient, UPLOAD_PATH};
