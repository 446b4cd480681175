//! Metric helpers for `queryable`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::moment::Moment;

/// Name of the counter tracking finished executions.
pub const EXECUTIONS_TOTAL: &str = "queryable_executions_total";
/// Name of the counter tracking observer failures.
pub const OBSERVER_FAILURES_TOTAL: &str = "queryable_observer_failures_total";
/// Name of the counter tracking bounded-poll checks.
pub const POLL_ATTEMPTS_TOTAL: &str = "queryable_poll_attempts_total";
/// Name of the counter tracking polls that gave up.
pub const POLL_EXHAUSTED_TOTAL: &str = "queryable_poll_exhausted_total";

/// How an execution finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every moment ran and a result was produced.
    Success,
    /// An observer, the transport, or the final result check failed.
    Failure,
}

impl Outcome {
    /// Label value used for the `outcome` dimension.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

/// Record a finished execution.
pub fn inc_executions(outcome: Outcome) {
    #[cfg(feature = "metrics")]
    counter!(EXECUTIONS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = outcome;
}

/// Record an observer failure during `moment`.
pub fn inc_observer_failures(moment: Moment) {
    #[cfg(feature = "metrics")]
    counter!(OBSERVER_FAILURES_TOTAL, "moment" => moment.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = moment;
}

/// Record one bounded-poll check.
pub fn inc_poll_attempts() {
    #[cfg(feature = "metrics")]
    counter!(POLL_ATTEMPTS_TOTAL).increment(1);
}

/// Record a poll that exhausted its attempts.
pub fn inc_poll_exhausted() {
    #[cfg(feature = "metrics")]
    counter!(POLL_EXHAUSTED_TOTAL).increment(1);
}
