//! Default header injection.

use std::{collections::BTreeMap, sync::Arc};

use super::Behavior;
use crate::{moment::Moment, pipeline::Pipeline};

/// Insert headers the request does not already carry.
///
/// Headers set by the caller or by an earlier observer win; names compare
/// ASCII case-insensitively.
///
/// # Examples
///
/// ```
/// use queryable::DefaultHeaders;
///
/// let defaults = DefaultHeaders::new()
///     .header("Accept", "application/json")
///     .header("User-Agent", "queryable");
/// assert_eq!(defaults.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultHeaders {
    headers: Arc<BTreeMap<String, String>>,
}

impl DefaultHeaders {
    /// Create an empty set of defaults.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Add a default header, replacing an earlier default of the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.headers).insert(name.into(), value.into());
        self
    }

    /// Number of default headers.
    #[must_use]
    pub fn len(&self) -> usize { self.headers.len() }

    /// Returns true if no defaults are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.headers.is_empty() }
}

impl<R: Send + 'static> Behavior<R> for DefaultHeaders {
    fn apply(&self, pipeline: &mut Pipeline<R>) {
        if self.headers.is_empty() {
            return;
        }
        let defaults = Arc::clone(&self.headers);
        pipeline.on(Moment::Pre).register_fn(move |mut state| {
            for (name, value) in defaults.iter() {
                let present = state
                    .config
                    .headers
                    .keys()
                    .any(|existing| existing.eq_ignore_ascii_case(name));
                if !present {
                    state.config.headers.insert(name.clone(), value.clone());
                }
            }
            async move { Ok(state) }
        });
    }
}
