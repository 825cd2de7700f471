//! Metrics collection.
//!
//! # Metrics
//! - `remote_kernel_forward_total` (counter): exchanges by method, outcome
//! - `remote_kernel_forward_duration_seconds` (histogram): exchange latency
//!
//! Recorded through the `metrics` facade; installing a recorder/exporter is
//! left to the embedding application.

use std::time::Instant;

use http::Method;
use metrics::{counter, histogram};

/// Record one completed forward attempt.
pub fn record_forward(method: &Method, outcome: &'static str, started: Instant) {
    counter!(
        "remote_kernel_forward_total",
        "method" => method.as_str().to_owned(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "remote_kernel_forward_duration_seconds",
        "method" => method.as_str().to_owned()
    )
    .record(started.elapsed().as_secs_f64());
}
