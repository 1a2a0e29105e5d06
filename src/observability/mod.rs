//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! SDK and query layers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (query counters and latencies)
//!
//! Consumers:
//!     → stderr (the ledger-query binary)
//!     → whatever metrics recorder an embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (channel, peer, user, org, request_id) on every event
//! - Metrics go through the `metrics` facade and are no-ops without a recorder

pub mod logging;
pub mod metrics;
