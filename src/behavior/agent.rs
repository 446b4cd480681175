//! Proxy agent injection.

use super::Behavior;
use crate::{moment::Moment, pipeline::Pipeline, state::ProxyAgent};

/// Attach a transport-level proxy agent to every request.
///
/// Registers one `Pre` observer that sets [`RequestConfig::agent`] and leaves
/// the rest of the state untouched. A later behavior may still replace the
/// agent; order is application order.
///
/// [`RequestConfig::agent`]: crate::RequestConfig::agent
///
/// # Examples
///
/// ```
/// use queryable::{Agent, BoxError, Moment, Pipeline, ProxyAgent, transport_fn};
///
/// let agent = Agent::new(ProxyAgent::new("http://proxy.local:3128"));
/// let pipeline = Pipeline::new(transport_fn(|_, _| async { Ok::<_, BoxError>(()) }))
///     .using(agent.clone());
/// assert_eq!(pipeline.observer_count(Moment::Pre), 1);
/// assert_eq!(agent.proxy().endpoint(), "http://proxy.local:3128");
/// ```
#[derive(Clone, Debug)]
pub struct Agent {
    proxy: ProxyAgent,
}

impl Agent {
    /// Build the behavior for `proxy`.
    #[must_use]
    pub fn new(proxy: ProxyAgent) -> Self { Self { proxy } }

    /// Proxy this behavior injects.
    #[must_use]
    pub fn proxy(&self) -> &ProxyAgent { &self.proxy }
}

impl<R: Send + 'static> Behavior<R> for Agent {
    fn apply(&self, pipeline: &mut Pipeline<R>) {
        let proxy = self.proxy.clone();
        pipeline.on(Moment::Pre).register_fn(move |mut state| {
            state.config.agent = Some(proxy.clone());
            async move { Ok(state) }
        });
    }
}
