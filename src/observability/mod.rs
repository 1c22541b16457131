//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay handler
//!     → logging.rs (structured log events, request ID in span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
