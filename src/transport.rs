//! The transport collaborator invoked at the `Send` moment.
//!
//! The pipeline treats the transport as opaque: it hands over the current
//! target and configuration and stores whatever comes back as the result.

use std::{future::Future, marker::PhantomData};

use async_trait::async_trait;

use crate::{
    error::BoxError,
    state::{RequestConfig, Target},
};

/// Issues the actual request once every `Send` observer has run.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use queryable::{BoxError, RequestConfig, Target, Transport};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Transport for Echo {
///     type Response = String;
///
///     async fn send(&self, target: &Target, _config: &RequestConfig) -> Result<String, BoxError> {
///         Ok(target.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Outcome placed into the state's `result`.
    type Response: Send + 'static;

    /// Perform the request described by `target` and `config`.
    async fn send(
        &self,
        target: &Target,
        config: &RequestConfig,
    ) -> Result<Self::Response, BoxError>;
}

/// Transport backed by an async closure. See [`transport_fn`].
pub struct FnTransport<F, R> {
    f: F,
    _response: PhantomData<fn() -> R>,
}

/// Adapt an async closure into a [`Transport`].
///
/// The closure receives owned copies of the target and configuration so the
/// returned future need not borrow from the pipeline.
///
/// # Examples
///
/// ```
/// use queryable::{BoxError, transport_fn};
///
/// let transport = transport_fn(|target, _config| async move {
///     Ok::<_, BoxError>(format!("fetched {target}"))
/// });
/// let _ = transport;
/// ```
pub fn transport_fn<F, Fut, R>(f: F) -> FnTransport<F, R>
where
    F: Fn(Target, RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, BoxError>> + Send,
    R: Send + 'static,
{
    FnTransport {
        f,
        _response: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, R> Transport for FnTransport<F, R>
where
    F: Fn(Target, RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, BoxError>> + Send,
    R: Send + 'static,
{
    type Response = R;

    async fn send(&self, target: &Target, config: &RequestConfig) -> Result<R, BoxError> {
        (self.f)(target.clone(), config.clone()).await
    }
}
