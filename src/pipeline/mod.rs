//! Pipeline instances: moment registration and behavior application.
//!
//! A [`Pipeline`] is built per logical request. Behaviors register observers
//! on its moments, then [`Pipeline::execute`] consumes it and drives the
//! request through [`Moment::ORDER`]. Instances share nothing with each
//! other, so concurrent executions need no locking.

use std::{future::Future, sync::Arc};

mod driver;
mod registry;

use registry::MomentRegistry;

use crate::{
    behavior::Behavior,
    error::{BoxError, PipelineError},
    moment::Moment,
    observer::{ErrorObserver, Observer, error_observer, observer},
    state::RequestState,
    tracing_config::TracingConfig,
    transport::Transport,
};

/// A single-use request pipeline producing results of type `R`.
///
/// # Examples
///
/// ```
/// use queryable::{Agent, BoxError, Pipeline, ProxyAgent, RequestConfig, transport_fn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), queryable::PipelineError> {
/// let transport = transport_fn(|_target, config| async move {
///     Ok::<_, BoxError>(config.agent.map(|a| a.endpoint().to_owned()))
/// });
/// let via = Pipeline::new(transport)
///     .using(Agent::new(ProxyAgent::new("http://proxy:3128")))
///     .execute("https://example/resource", RequestConfig::default())
///     .await?;
/// assert_eq!(via.as_deref(), Some("http://proxy:3128"));
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<R> {
    registry: MomentRegistry<R>,
    error_observers: Vec<ErrorObserver>,
    transport: Arc<dyn Transport<Response = R>>,
    tracing_config: TracingConfig,
}

impl<R: Send + 'static> Pipeline<R> {
    /// Create an empty pipeline that sends through `transport`.
    #[must_use]
    pub fn new<T>(transport: T) -> Self
    where
        T: Transport<Response = R> + 'static,
    {
        Self::with_transport(Arc::new(transport))
    }

    /// Create an empty pipeline sharing an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport<Response = R>>) -> Self {
        Self {
            registry: MomentRegistry::default(),
            error_observers: Vec::new(),
            transport,
            tracing_config: TracingConfig::default(),
        }
    }

    /// Registration handle for `moment`.
    ///
    /// # Examples
    ///
    /// ```
    /// use queryable::{BoxError, Moment, Pipeline, transport_fn};
    ///
    /// let mut pipeline = Pipeline::new(transport_fn(|_, _| async { Ok::<_, BoxError>(()) }));
    /// pipeline
    ///     .on(Moment::Pre)
    ///     .register_fn(|state| async move { Ok(state) });
    /// assert_eq!(pipeline.observer_count(Moment::Pre), 1);
    /// ```
    pub fn on(&mut self, moment: Moment) -> MomentHandle<'_, R> {
        MomentHandle {
            registry: &mut self.registry,
            moment,
        }
    }

    /// Register an observer notified when execution fails.
    ///
    /// Error observers run in registration order, after the failing moment
    /// and before the error is returned. They cannot change the error.
    pub fn on_error<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&PipelineError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.error_observers.push(error_observer(f));
        self
    }

    /// Apply `behavior` to this instance and return it for chaining.
    ///
    /// Behaviors applied earlier register earlier, so on a shared moment
    /// their observers run first.
    #[must_use]
    pub fn using<B>(mut self, behavior: B) -> Self
    where
        B: Behavior<R>,
    {
        behavior.apply(&mut self);
        self
    }

    /// Apply every behavior in `behaviors`, left to right.
    #[must_use]
    pub fn using_all<I, B>(mut self, behaviors: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Behavior<R>,
    {
        for behavior in behaviors {
            behavior.apply(&mut self);
        }
        self
    }

    /// Apply `behavior` in place.
    pub fn apply<B>(&mut self, behavior: &B) -> &mut Self
    where
        B: Behavior<R> + ?Sized,
    {
        behavior.apply(self);
        self
    }

    /// Replace the tracing configuration used during execution.
    #[must_use]
    pub fn tracing_config(mut self, config: TracingConfig) -> Self {
        self.tracing_config = config;
        self
    }

    /// Number of observers registered on `moment`.
    #[must_use]
    pub fn observer_count(&self, moment: Moment) -> usize {
        self.registry.observers(moment).len()
    }

    /// Returns true if anything has been registered on `moment`.
    #[must_use]
    pub fn has_observers(&self, moment: Moment) -> bool { self.registry.contains(moment) }

    /// Number of error observers.
    #[must_use]
    pub fn error_observer_count(&self) -> usize { self.error_observers.len() }
}

/// Handle returned by [`Pipeline::on`] for registering on one moment.
pub struct MomentHandle<'a, R> {
    registry: &'a mut MomentRegistry<R>,
    moment: Moment,
}

impl<R: Send + 'static> MomentHandle<'_, R> {
    /// Append `observer` to this moment's list.
    ///
    /// Registering the same observer twice runs it twice.
    pub fn register(&mut self, observer: Observer<R>) -> &mut Self {
        self.registry.register(self.moment, observer);
        self
    }

    /// Box `f` into an observer and append it.
    pub fn register_fn<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn(RequestState<R>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RequestState<R>, BoxError>> + Send + 'static,
    {
        self.register(observer(f))
    }

    /// Moment this handle registers on.
    #[must_use]
    pub fn moment(&self) -> Moment { self.moment }
}
