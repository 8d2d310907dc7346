//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server, table builder and watcher produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Request ID recorded on every request span
//! - The routing core only logs route replacement, at debug level

pub mod logging;
pub mod metrics;
