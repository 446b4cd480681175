//! Deterministic checks for the bounded poller.

use std::{
    future::{Ready, ready},
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

/// Check that succeeds on a chosen call, counting every invocation.
///
/// ```rust
/// use queryable_testing::CountingCheck;
///
/// let check = CountingCheck::succeeding_on(2);
/// assert!(!check.call_once());
/// assert!(check.call_once());
/// assert_eq!(check.calls(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountingCheck {
    calls: Arc<AtomicU32>,
    succeed_on: Option<u32>,
}

impl CountingCheck {
    /// A check that never succeeds.
    pub fn never() -> Self { Self::default() }

    /// A check that succeeds on call number `call` (1-based) and after.
    pub fn succeeding_on(call: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            succeed_on: Some(call),
        }
    }

    /// Record a call and report whether it succeeds.
    pub fn call_once(&self) -> bool {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.succeed_on.is_some_and(|target| n >= target)
    }

    /// Closure suitable for [`queryable::poll_until_true`].
    pub fn as_check(&self) -> impl FnMut() -> Ready<bool> + use<> {
        let this = self.clone();
        move || ready(this.call_once())
    }

    /// Number of calls so far.
    pub fn calls(&self) -> u32 { self.calls.load(Ordering::SeqCst) }
}
