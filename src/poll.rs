//! Bounded polling for eventually-consistent remote state.
//!
//! [`poll_until`] sleeps a fixed delay, runs a check, and repeats until the
//! check reports success or the attempt budget is spent. Running out of
//! attempts is not an error: the outcome says what happened and the caller
//! decides whether to proceed. Code that only wants to wait "long enough"
//! may ignore the outcome; the operation that follows is then the real
//! signal of whether the remote state had settled.

use std::{convert::Infallible, future::Future, time::Duration};

use serde::{Deserialize, Serialize};

use crate::metrics;

/// Delay and attempt budget for a bounded poll.
///
/// # Default Values
/// - `delay`: 10 seconds
/// - `max_attempts`: 5
///
/// # Invariants
/// - `delay` is at least [`PollConfig::MIN_DELAY`] once normalized; the
///   poller always normalizes before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Sleep before each check.
    pub delay: Duration,
    /// Maximum number of checks. Zero performs no checks.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(10),
            max_attempts: 5,
        }
    }
}

impl PollConfig {
    /// Smallest delay the poller will sleep between checks.
    pub const MIN_DELAY: Duration = Duration::from_millis(1);

    /// Create a configuration.
    #[must_use]
    pub const fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts,
        }
    }

    /// Set the delay before each check.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the maximum number of checks.
    #[must_use]
    pub const fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Raise the delay to [`Self::MIN_DELAY`] so a zero delay cannot spin.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use queryable::PollConfig;
    ///
    /// let cfg = PollConfig::new(Duration::ZERO, 3).normalized();
    /// assert_eq!(cfg.delay, PollConfig::MIN_DELAY);
    /// assert_eq!(cfg.max_attempts, 3);
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.delay = self.delay.max(Self::MIN_DELAY);
        self
    }
}

/// How a bounded poll ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The check reported success on attempt `attempts`.
    Satisfied {
        /// Checks performed, including the successful one.
        attempts: u32,
    },
    /// Every attempt ran without success.
    Exhausted {
        /// Checks performed.
        attempts: u32,
    },
}

impl PollOutcome {
    /// Returns true if the check succeeded.
    #[must_use]
    pub const fn is_satisfied(self) -> bool { matches!(self, Self::Satisfied { .. }) }

    /// Number of checks performed.
    #[must_use]
    pub const fn attempts(self) -> u32 {
        match self {
            Self::Satisfied { attempts } | Self::Exhausted { attempts } => attempts,
        }
    }
}

/// Poll `check` until it returns `Ok(true)` or the attempt budget runs out.
///
/// Each attempt sleeps `config.delay` first, then runs the check. A
/// `max_attempts` of zero returns immediately without checking.
///
/// # Errors
///
/// Returns the check's error as soon as one occurs; remaining attempts are
/// abandoned.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use queryable::{PollConfig, poll_until};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calls = 0;
/// let outcome = poll_until(PollConfig::new(Duration::from_millis(1), 5), || {
///     calls += 1;
///     let done = calls == 2;
///     async move { Ok::<_, std::io::Error>(done) }
/// })
/// .await
/// .expect("check never fails");
/// assert_eq!(outcome.attempts(), 2);
/// assert!(outcome.is_satisfied());
/// # }
/// ```
pub async fn poll_until<F, Fut, E>(config: PollConfig, mut check: F) -> Result<PollOutcome, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let config = config.normalized();
    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(config.delay).await;
        metrics::inc_poll_attempts();
        if check().await? {
            tracing::debug!(attempt, "poll condition satisfied");
            return Ok(PollOutcome::Satisfied { attempts: attempt });
        }
        tracing::debug!(
            attempt,
            max_attempts = config.max_attempts,
            "poll condition not yet satisfied"
        );
    }
    tracing::info!(
        max_attempts = config.max_attempts,
        delay_ms = u64::try_from(config.delay.as_millis()).unwrap_or(u64::MAX),
        "poll attempts exhausted; proceeding"
    );
    metrics::inc_poll_exhausted();
    Ok(PollOutcome::Exhausted {
        attempts: config.max_attempts,
    })
}

/// Poll an infallible `check`. See [`poll_until`].
pub async fn poll_until_true<F, Fut>(config: PollConfig, mut check: F) -> PollOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let outcome = poll_until(config, || {
        let fut = check();
        async move { Ok::<_, Infallible>(fut.await) }
    })
    .await;
    match outcome {
        Ok(outcome) => outcome,
        Err(never) => match never {},
    }
}
