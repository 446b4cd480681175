//! Per-moment diagnostic events.

use super::Behavior;
use crate::{moment::Moment, pipeline::Pipeline};

/// Emit a `DEBUG` event on every moment as the state passes through.
///
/// Each event carries the moment, the target and whether a result is
/// present. The state itself is never modified.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logging;

impl Logging {
    /// Build the behavior.
    #[must_use]
    pub const fn new() -> Self { Self }
}

impl<R: Send + 'static> Behavior<R> for Logging {
    fn apply(&self, pipeline: &mut Pipeline<R>) {
        for moment in Moment::ORDER {
            pipeline.on(moment).register_fn(move |state| {
                tracing::debug!(
                    moment = moment.as_str(),
                    target = %state.target,
                    has_result = state.result.is_some(),
                    "moment reached"
                );
                async move { Ok(state) }
            });
        }
    }
}
