//! Canonical error types for pipeline execution.
//!
//! Observer and transport failures keep their original cause so callers of
//! higher-level operations see the reason unmodified.

use crate::moment::Moment;

/// Boxed error produced by observers, transports and poll checks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`Pipeline::execute`](crate::Pipeline::execute).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An observer rejected during the named moment.
    #[error("{moment} observer failed: {source}")]
    Observer {
        /// Moment whose observer chain was running.
        moment: Moment,
        /// The observer's error.
        #[source]
        source: BoxError,
    },
    /// The transport call rejected.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// Every moment completed but no observer or transport left a result.
    #[error("pipeline completed without a result")]
    MissingResult,
}

impl PipelineError {
    /// Moment during which the failure happened, if any.
    ///
    /// Transport failures report [`Moment::Send`].
    #[must_use]
    pub fn moment(&self) -> Option<Moment> {
        match self {
            Self::Observer { moment, .. } => Some(*moment),
            Self::Transport(_) => Some(Moment::Send),
            Self::MissingResult => None,
        }
    }

    /// Borrow the original cause, if one exists.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Observer { source, .. } | Self::Transport(source) => Some(source.as_ref()),
            Self::MissingResult => None,
        }
    }

    /// Consume the error and return the original cause unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use queryable::{Moment, PipelineError};
    ///
    /// let err = PipelineError::Observer {
    ///     moment: Moment::Pre,
    ///     source: "denied".into(),
    /// };
    /// let cause = err.into_cause().expect("observer errors carry a cause");
    /// assert_eq!(cause.to_string(), "denied");
    /// ```
    #[must_use]
    pub fn into_cause(self) -> Option<BoxError> {
        match self {
            Self::Observer { source, .. } | Self::Transport(source) => Some(source),
            Self::MissingResult => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rstest::rstest;

    use super::*;

    fn io_error(msg: &str) -> BoxError { Box::new(io::Error::other(msg.to_owned())) }

    #[rstest]
    #[case(
        PipelineError::Observer { moment: Moment::Auth, source: io_error("no token") },
        "auth observer failed: no token",
        Some(Moment::Auth)
    )]
    #[case(
        PipelineError::Transport(io_error("reset")),
        "transport error: reset",
        Some(Moment::Send)
    )]
    #[case(
        PipelineError::MissingResult,
        "pipeline completed without a result",
        None
    )]
    fn display_and_moment(
        #[case] err: PipelineError,
        #[case] text: &str,
        #[case] moment: Option<Moment>,
    ) {
        assert_eq!(err.to_string(), text);
        assert_eq!(err.moment(), moment);
    }

    #[test]
    fn cause_is_preserved_for_downcasting() {
        let err = PipelineError::Transport(io_error("refused"));
        let source = std::error::Error::source(&err).expect("source present");
        assert_eq!(source.to_string(), "refused");

        let cause = err.into_cause().expect("cause present");
        let io = cause.downcast::<io::Error>().expect("original io::Error");
        assert_eq!(io.kind(), io::ErrorKind::Other);
    }
}
