//! Query metrics.
//!
//! # Metrics
//! - `ledger_query_total` (counter): queries by operation and outcome
//! - `ledger_query_duration_seconds` (histogram): latency by operation
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   chooses the exporter
//! - Labels are static strings to keep cardinality bounded

use std::time::Duration;

pub const QUERY_TOTAL: &str = "ledger_query_total";
pub const QUERY_DURATION: &str = "ledger_query_duration_seconds";

/// Record one finished query.
pub fn record_query(operation: &'static str, success: bool, elapsed: Duration) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!(QUERY_TOTAL, "operation" => operation, "outcome" => outcome).increment(1);
    metrics::histogram!(QUERY_DURATION, "operation" => operation).record(elapsed.as_secs_f64());
}
