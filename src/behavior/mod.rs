//! Composable behaviors.
//!
//! A [`Behavior`] registers observers on one or more moments of a
//! [`Pipeline`]. Behaviors resolve their configuration once, when they are
//! built, and each application only registers closures; the behavior itself
//! is never mutated and may be applied to any number of pipelines.
//!
//! Behaviors compose left to right. Tuples of behaviors and [`Behaviors`]
//! lists are themselves behaviors, applied in order.

use std::sync::Arc;

use crate::pipeline::Pipeline;

mod agent;
mod headers;
mod logging;
mod timeout;

pub use agent::Agent;
pub use headers::DefaultHeaders;
pub use logging::Logging;
pub use timeout::Timeout;

/// A unit of cross-cutting logic registered against a pipeline.
///
/// Implementations must not assume they are the only observer on a moment.
/// Relative order between behaviors is their application order.
///
/// # Examples
///
/// ```
/// use queryable::{Behavior, Moment, Pipeline};
///
/// struct Stamp;
///
/// impl<R: Send + 'static> Behavior<R> for Stamp {
///     fn apply(&self, pipeline: &mut Pipeline<R>) {
///         pipeline.on(Moment::Pre).register_fn(|mut state| async move {
///             state.config.headers.insert("X-Stamp".into(), "1".into());
///             Ok(state)
///         });
///     }
/// }
/// ```
pub trait Behavior<R> {
    /// Register this behavior's observers on `pipeline`.
    fn apply(&self, pipeline: &mut Pipeline<R>);
}

/// Behavior backed by a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FnBehavior<F>(F);

/// Turn a closure over `&mut Pipeline<R>` into a [`Behavior`].
///
/// # Examples
///
/// ```
/// use queryable::{BoxError, Moment, Pipeline, behavior, transport_fn};
///
/// let trace_post = behavior::from_fn(|pipeline: &mut Pipeline<()>| {
///     pipeline.on(Moment::Post).register_fn(|state| async move { Ok(state) });
/// });
/// let pipeline = Pipeline::new(transport_fn(|_, _| async { Ok::<_, BoxError>(()) }))
///     .using(trace_post);
/// assert_eq!(pipeline.observer_count(Moment::Post), 1);
/// ```
pub fn from_fn<R, F>(f: F) -> FnBehavior<F>
where
    F: Fn(&mut Pipeline<R>),
{
    FnBehavior(f)
}

impl<R, F> Behavior<R> for FnBehavior<F>
where
    F: Fn(&mut Pipeline<R>),
{
    fn apply(&self, pipeline: &mut Pipeline<R>) { (self.0)(pipeline); }
}

impl<R, B> Behavior<R> for Arc<B>
where
    B: Behavior<R> + ?Sized,
{
    fn apply(&self, pipeline: &mut Pipeline<R>) { (**self).apply(pipeline); }
}

macro_rules! tuple_behavior {
    ($($name:ident),+) => {
        impl<R, $($name),+> Behavior<R> for ($($name,)+)
        where
            $($name: Behavior<R>),+
        {
            #[allow(non_snake_case, reason = "tuple fields reuse the type parameter names")]
            fn apply(&self, pipeline: &mut Pipeline<R>) {
                let ($($name,)+) = self;
                $($name.apply(pipeline);)+
            }
        }
    };
}

tuple_behavior!(A);
tuple_behavior!(A, B);
tuple_behavior!(A, B, C);
tuple_behavior!(A, B, C, D);
tuple_behavior!(A, B, C, D, E);
tuple_behavior!(A, B, C, D, E, F);
tuple_behavior!(A, B, C, D, E, F, G);
tuple_behavior!(A, B, C, D, E, F, G, H);

/// An ordered, dynamically built list of behaviors.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use queryable::{BoxError, DefaultHeaders, Moment, Pipeline, Timeout, behavior::Behaviors, transport_fn};
///
/// let defaults = Behaviors::new()
///     .with(DefaultHeaders::new().header("Accept", "application/json"))
///     .with(Timeout::new(Duration::from_secs(5)));
/// let pipeline = Pipeline::new(transport_fn(|_, _| async { Ok::<_, BoxError>(()) }))
///     .using(defaults.clone());
/// assert_eq!(pipeline.observer_count(Moment::Pre), 2);
/// assert_eq!(defaults.len(), 2);
/// ```
pub struct Behaviors<R> {
    items: Vec<Arc<dyn Behavior<R> + Send + Sync>>,
}

impl<R> Behaviors<R> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self { Self { items: Vec::new() } }

    /// Append `behavior`; it applies after everything already listed.
    #[must_use]
    pub fn with<B>(mut self, behavior: B) -> Self
    where
        B: Behavior<R> + Send + Sync + 'static,
    {
        self.push(behavior);
        self
    }

    /// Append `behavior` in place.
    pub fn push<B>(&mut self, behavior: B)
    where
        B: Behavior<R> + Send + Sync + 'static,
    {
        self.items.push(Arc::new(behavior));
    }

    /// Number of listed behaviors.
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns true if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<R> Default for Behaviors<R> {
    fn default() -> Self { Self::new() }
}

impl<R> Clone for Behaviors<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<R> Behavior<R> for Behaviors<R> {
    fn apply(&self, pipeline: &mut Pipeline<R>) {
        for behavior in &self.items {
            behavior.apply(pipeline);
        }
    }
}

#[cfg(test)]
mod tests;
