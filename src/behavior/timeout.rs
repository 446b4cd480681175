//! Transport timeout injection.

use std::time::Duration;

use super::Behavior;
use crate::{moment::Moment, pipeline::Pipeline};

/// Set [`RequestConfig::timeout`](crate::RequestConfig::timeout) on every
/// request.
///
/// The pipeline does not enforce the timeout; it is a hint for the
/// transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Build the behavior for `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self { Self { duration } }

    /// Timeout this behavior injects.
    #[must_use]
    pub const fn duration(&self) -> Duration { self.duration }
}

impl<R: Send + 'static> Behavior<R> for Timeout {
    fn apply(&self, pipeline: &mut Pipeline<R>) {
        let duration = self.duration;
        pipeline.on(Moment::Pre).register_fn(move |mut state| {
            state.config.timeout = Some(duration);
            async move { Ok(state) }
        });
    }
}
