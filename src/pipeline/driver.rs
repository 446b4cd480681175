//! Execution driver: walks the moments in order and calls the transport.

use std::time::Instant;

use tracing::Instrument;

use super::Pipeline;
use crate::{
    error::PipelineError,
    metrics::{self, Outcome},
    moment::Moment,
    state::{RequestConfig, RequestState, Target},
    tracing_helpers::{emit_timing_event, execute_span, moment_span},
};

impl<R: Send + 'static> Pipeline<R> {
    /// Execute the pipeline and return the final result.
    ///
    /// # Errors
    ///
    /// Returns the first observer or transport failure, or
    /// [`PipelineError::MissingResult`] if every moment completed but the
    /// state holds no result.
    pub async fn execute(
        self,
        target: impl Into<Target>,
        config: RequestConfig,
    ) -> Result<R, PipelineError> {
        let state = RequestState::new(target, config);
        let span = execute_span(&self.tracing_config, &state.target, self.registry.len());
        let start = self.tracing_config.execute_timing.then(Instant::now);
        async move {
            let outcome = match self.drive(state).await {
                Ok(state) => match state.result {
                    Some(result) => Ok(result),
                    None => Err(self.fail(PipelineError::MissingResult).await),
                },
                Err(err) => Err(err),
            };
            self.finish(outcome.is_ok(), start);
            outcome
        }
        .instrument(span)
        .await
    }

    /// Execute the pipeline from `state` and return the final state.
    ///
    /// Unlike [`execute`](Self::execute), a final state without a result is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns the first observer or transport failure.
    pub async fn execute_state(
        self,
        state: RequestState<R>,
    ) -> Result<RequestState<R>, PipelineError> {
        let span = execute_span(&self.tracing_config, &state.target, self.registry.len());
        let start = self.tracing_config.execute_timing.then(Instant::now);
        async move {
            let outcome = self.drive(state).await;
            self.finish(outcome.is_ok(), start);
            outcome
        }
        .instrument(span)
        .await
    }

    /// Run every moment in order, calling the transport after the `Send`
    /// observers. Failures are reported to error observers before returning.
    async fn drive(&self, mut state: RequestState<R>) -> Result<RequestState<R>, PipelineError> {
        for moment in Moment::ORDER {
            state = match self.run_moment(moment, state).await {
                Ok(state) => state,
                Err(err) => return Err(self.fail(err).await),
            };
            if moment == Moment::Send {
                state = match self.send(state).await {
                    Ok(state) => state,
                    Err(err) => return Err(self.fail(err).await),
                };
            }
        }
        Ok(state)
    }

    async fn run_moment(
        &self,
        moment: Moment,
        mut state: RequestState<R>,
    ) -> Result<RequestState<R>, PipelineError> {
        let observers = self.registry.observers(moment);
        if observers.is_empty() {
            return Ok(state);
        }
        let span = moment_span(&self.tracing_config, moment, observers.len());
        async move {
            for observer in observers {
                state = observer(state).await.map_err(|source| {
                    metrics::inc_observer_failures(moment);
                    PipelineError::Observer { moment, source }
                })?;
            }
            Ok(state)
        }
        .instrument(span)
        .await
    }

    /// Call the transport with the current target and configuration and
    /// store its response as the result, replacing any earlier value.
    async fn send(&self, state: RequestState<R>) -> Result<RequestState<R>, PipelineError> {
        let response = self
            .transport
            .send(&state.target, &state.config)
            .await
            .map_err(PipelineError::Transport)?;
        Ok(RequestState {
            result: Some(response),
            ..state
        })
    }

    async fn fail(&self, error: PipelineError) -> PipelineError {
        tracing::debug!(
            moment = error.moment().map(Moment::as_str),
            error = %error,
            "pipeline execution failed"
        );
        for observer in &self.error_observers {
            observer(&error).await;
        }
        error
    }

    fn finish(&self, succeeded: bool, start: Option<Instant>) {
        let outcome = if succeeded {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        tracing::Span::current().record("outcome", outcome.as_str());
        metrics::inc_executions(outcome);
        emit_timing_event(&self.tracing_config, start);
    }
}
