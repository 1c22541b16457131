//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id)
//!     → relay::handler (validate, forward, relay)
//!     → Send to client (x-request-id echoed)
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer, ServerError, HEALTH_ROUTE, UPLOAD_ROUTE};
