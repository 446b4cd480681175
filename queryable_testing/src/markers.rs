//! Marker behaviors recording the order observers run in.

use std::sync::{Arc, Mutex};

use queryable::{Behavior, Moment, Pipeline, behavior::from_fn};
use rstest::fixture;

/// Shared, ordered log of marker entries.
#[derive(Clone, Debug, Default)]
pub struct MarkerLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MarkerLog {
    /// Append `entry`.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .expect("marker log poisoned")
            .push(entry.into());
    }

    /// Snapshot of the entries recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("marker log poisoned").clone()
    }

    /// Entries with the `moment:` prefix removed.
    pub fn ids(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| match entry.split_once(':') {
                Some((_, id)) => id.to_owned(),
                None => entry,
            })
            .collect()
    }
}

/// Behavior registering one observer on `moment` that logs `moment:id`.
pub fn marker<R>(log: &MarkerLog, moment: Moment, id: &str) -> impl Behavior<R> + use<R>
where
    R: Send + 'static,
{
    let log = log.clone();
    let entry = format!("{moment}:{id}");
    from_fn(move |pipeline: &mut Pipeline<R>| {
        let log = log.clone();
        let entry = entry.clone();
        pipeline.on(moment).register_fn(move |state| {
            log.push(entry.clone());
            async move { Ok(state) }
        });
    })
}

/// Fresh, empty marker log.
#[fixture]
pub fn marker_log() -> MarkerLog { MarkerLog::default() }
