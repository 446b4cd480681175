//! Tracing configuration for pipeline executions.
//!
//! [`TracingConfig`] controls the level of the spans emitted around an
//! execution and around each observed moment, and whether an elapsed-time
//! event is recorded when an execution completes.

use tracing::Level;

/// Controls tracing span levels and per-execution timing.
///
/// By default the `pipeline.execute` span is emitted at `DEBUG` and each
/// `pipeline.moment` span at `TRACE`. Timing is disabled by default.
///
/// Spans are always created at the configured level. When no `tracing`
/// subscriber is installed, span creation is a no-op. When timing is enabled,
/// an additional event recording `elapsed_us` is emitted inside the execute
/// span once the execution finishes, successfully or not.
///
/// # Examples
///
/// ```
/// use queryable::TracingConfig;
/// use tracing::Level;
///
/// let config = TracingConfig::default()
///     .with_execute_level(Level::INFO)
///     .with_execute_timing(true);
/// let _ = config;
///
/// let verbose = TracingConfig::default().with_all_levels(Level::TRACE);
/// let _ = verbose;
/// ```
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub(crate) execute_level: Level,
    pub(crate) moment_level: Level,
    pub(crate) execute_timing: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            execute_level: Level::DEBUG,
            moment_level: Level::TRACE,
            execute_timing: false,
        }
    }
}

impl TracingConfig {
    /// Set the level of the `pipeline.execute` span.
    #[must_use]
    pub fn with_execute_level(mut self, level: Level) -> Self {
        self.execute_level = level;
        self
    }

    /// Set the level of each `pipeline.moment` span.
    #[must_use]
    pub fn with_moment_level(mut self, level: Level) -> Self {
        self.moment_level = level;
        self
    }

    /// Enable or disable the `elapsed_us` event for each execution.
    ///
    /// The event is emitted at `DEBUG` level inside the execute span.
    ///
    /// # Examples
    ///
    /// ```
    /// use queryable::TracingConfig;
    ///
    /// let config = TracingConfig::default().with_execute_timing(true);
    /// let _ = config;
    /// ```
    #[must_use]
    pub fn with_execute_timing(mut self, enabled: bool) -> Self {
        self.execute_timing = enabled;
        self
    }

    /// Set every span to the same level.
    #[must_use]
    pub fn with_all_levels(self, level: Level) -> Self {
        self.with_execute_level(level).with_moment_level(level)
    }
}
