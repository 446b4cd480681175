//! Per-instance store of observers keyed by moment.

use std::collections::BTreeMap;

use crate::{moment::Moment, observer::Observer};

/// Ordered observer lists, one per moment that has been registered on.
///
/// Lists are created lazily on first registration; a moment nobody observes
/// costs nothing. Within a list, observers keep their registration order.
pub(crate) struct MomentRegistry<R> {
    moments: BTreeMap<Moment, Vec<Observer<R>>>,
}

impl<R> Default for MomentRegistry<R> {
    fn default() -> Self {
        Self {
            moments: BTreeMap::new(),
        }
    }
}

impl<R> MomentRegistry<R> {
    /// Append `observer` to the list for `moment`.
    ///
    /// The same observer may be registered more than once; it then runs once
    /// per registration.
    pub(crate) fn register(&mut self, moment: Moment, observer: Observer<R>) {
        self.moments.entry(moment).or_default().push(observer);
    }

    /// Observers for `moment` in registration order.
    pub(crate) fn observers(&self, moment: Moment) -> &[Observer<R>] {
        self.moments.get(&moment).map_or(&[], Vec::as_slice)
    }

    /// Returns true once anything has been registered on `moment`.
    pub(crate) fn contains(&self, moment: Moment) -> bool { self.moments.contains_key(&moment) }

    /// Total observers across all moments.
    pub(crate) fn len(&self) -> usize { self.moments.values().map(Vec::len).sum() }
}
