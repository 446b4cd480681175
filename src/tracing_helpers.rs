//! Span and event helpers for pipeline executions.
//!
//! These helpers centralise span creation with dynamic level selection and
//! elapsed-time emission, keeping the instrumentation out of the driver loop.

use std::time::Instant;

use tracing::{Level, Span};

use crate::{moment::Moment, state::Target, tracing_config::TracingConfig};

/// Create a tracing span at a dynamically selected level.
///
/// Each branch calls the corresponding `tracing::<level>_span!` macro so the
/// span metadata stays static per branch while the selection is dynamic.
macro_rules! dynamic_span {
    ($level:expr, $name:expr $(, $($field:tt)*)?) => {
        match $level {
            Level::ERROR => tracing::error_span!($name $(, $($field)*)?),
            Level::WARN  => tracing::warn_span!($name $(, $($field)*)?),
            Level::INFO  => tracing::info_span!($name $(, $($field)*)?),
            Level::DEBUG => tracing::debug_span!($name $(, $($field)*)?),
            Level::TRACE => tracing::trace_span!($name $(, $($field)*)?),
        }
    };
}

/// Create the span wrapping a whole execution.
///
/// `outcome` is recorded once the execution finishes.
#[expect(
    clippy::cognitive_complexity,
    reason = "complexity from dynamic_span! macro expansion"
)]
pub(crate) fn execute_span(config: &TracingConfig, target: &Target, observers: usize) -> Span {
    dynamic_span!(
        config.execute_level,
        "pipeline.execute",
        target = %target,
        observers = observers,
        outcome = tracing::field::Empty
    )
}

/// Create the span wrapping one moment's observer chain.
#[expect(
    clippy::cognitive_complexity,
    reason = "complexity from dynamic_span! macro expansion"
)]
pub(crate) fn moment_span(config: &TracingConfig, moment: Moment, observers: usize) -> Span {
    dynamic_span!(
        config.moment_level,
        "pipeline.moment",
        moment = moment.as_str(),
        observers = observers
    )
}

/// Emit the elapsed-time event if timing is enabled.
pub(crate) fn emit_timing_event(config: &TracingConfig, start: Option<Instant>) {
    if !config.execute_timing {
        return;
    }
    if let Some(start) = start {
        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::debug!(elapsed_us, "pipeline execution completed");
    }
}
