//! Observer callback types.
//!
//! Moment observers receive the [`RequestState`] by value and resolve to the
//! state the next observer will see. Error observers are notified once when
//! an execution fails, before the error reaches the caller.

use std::{future::Future, sync::Arc};

pub use futures::future::BoxFuture;
use futures::FutureExt;

use crate::{
    error::{BoxError, PipelineError},
    state::RequestState,
};

/// Future returned by a moment observer.
pub type ObserverFuture<R> = BoxFuture<'static, Result<RequestState<R>, BoxError>>;

/// Asynchronous transform of the pipeline state registered on a moment.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use queryable::{Observer, RequestState};
///
/// let passthrough: Observer<String> =
///     Arc::new(|state: RequestState<String>| Box::pin(async move { Ok(state) }));
/// let _ = passthrough;
/// ```
pub type Observer<R> = Arc<dyn Fn(RequestState<R>) -> ObserverFuture<R> + Send + Sync>;

/// Callback notified when an execution fails.
///
/// The observer sees the error but cannot replace it; the original error is
/// returned to the caller once every error observer has run.
pub type ErrorObserver = Arc<dyn Fn(&PipelineError) -> BoxFuture<'static, ()> + Send + Sync>;

/// Box an async closure into an [`Observer`].
///
/// # Examples
///
/// ```
/// use queryable::{RequestState, observer};
///
/// let stamp = observer(|mut state: RequestState<String>| async move {
///     state.config.headers.insert("X-Stamp".into(), "1".into());
///     Ok(state)
/// });
/// let _ = stamp;
/// ```
pub fn observer<R, F, Fut>(f: F) -> Observer<R>
where
    R: 'static,
    F: Fn(RequestState<R>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RequestState<R>, BoxError>> + Send + 'static,
{
    Arc::new(move |state: RequestState<R>| -> ObserverFuture<R> { f(state).boxed() })
}

/// Box an async closure into an [`ErrorObserver`].
pub fn error_observer<F, Fut>(f: F) -> ErrorObserver
where
    F: Fn(&PipelineError) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |error: &PipelineError| -> BoxFuture<'static, ()> { f(error).boxed() })
}
