//! Scripted transport that records every request.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use queryable::{BoxError, RequestConfig, Target, Transport};
use rstest::fixture;

/// One request as seen by [`MockTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    /// Target handed to the transport.
    pub target: Target,
    /// Configuration handed to the transport.
    pub config: RequestConfig,
}

enum Reply<R> {
    Respond(R),
    Fail(String),
}

struct Inner<R> {
    calls: Vec<RecordedRequest>,
    script: VecDeque<Reply<R>>,
    fallback: Option<R>,
}

/// Transport double that records requests and answers from a script.
///
/// Scripted replies are consumed in order; once the script is empty the
/// fallback response is returned. Without a fallback an exhausted script
/// fails the request.
pub struct MockTransport<R> {
    inner: Arc<Mutex<Inner<R>>>,
    delay: Duration,
}

impl<R> Clone for MockTransport<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            delay: self.delay,
        }
    }
}

impl<R: Clone> MockTransport<R> {
    /// Create a transport with an empty script and no fallback.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                calls: Vec::new(),
                script: VecDeque::new(),
                fallback: None,
            })),
            delay: Duration::ZERO,
        }
    }

    /// Create a transport that always answers with `response`.
    pub fn responding(response: R) -> Self {
        let transport = Self::new();
        transport.lock().fallback = Some(response);
        transport
    }

    /// Queue a successful reply.
    #[must_use]
    pub fn then_respond(self, response: R) -> Self {
        self.lock().script.push_back(Reply::Respond(response));
        self
    }

    /// Queue a failing reply with `message` as the error text.
    #[must_use]
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.lock().script.push_back(Reply::Fail(message.into()));
        self
    }

    /// Sleep for `delay` before answering each request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedRequest> { self.lock().calls.clone() }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize { self.lock().calls.len() }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> { self.lock().calls.last().cloned() }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        self.inner.lock().expect("mock transport poisoned")
    }

    fn next_reply(&self, request: RecordedRequest) -> Result<R, BoxError> {
        let mut inner = self.lock();
        inner.calls.push(request);
        match inner.script.pop_front() {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(message.into()),
            None => inner
                .fallback
                .clone()
                .ok_or_else(|| BoxError::from("mock transport script exhausted")),
        }
    }
}

impl<R: Clone> Default for MockTransport<R> {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl<R> Transport for MockTransport<R>
where
    R: Clone + Send + 'static,
{
    type Response = R;

    async fn send(&self, target: &Target, config: &RequestConfig) -> Result<R, BoxError> {
        let request = RecordedRequest {
            target: target.clone(),
            config: config.clone(),
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.next_reply(request)
    }
}

/// Transport answering every request with `"ok"`.
#[fixture]
pub fn mock_transport() -> MockTransport<String> { MockTransport::responding("ok".to_owned()) }
