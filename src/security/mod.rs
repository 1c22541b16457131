//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → headers.rs (keep authorization + cookie only)
//!     → upstream request
//!
//! Upstream response:
//!     → headers.rs (keep content-type only)
//!     → relayed response
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything not on an allow-list is dropped
//! - Body size limits are enforced by the router (DefaultBodyLimit)

pub mod headers;
