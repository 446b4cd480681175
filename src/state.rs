//! State threaded through a pipeline execution.
//!
//! [`RequestState`] carries the three pieces every observer sees: the
//! [`Target`] being acted upon, the [`RequestConfig`] the transport will use,
//! and the accumulating `result`. Observers take the state by value and hand
//! it back, so they may replace any field but never drop one.

use std::{collections::BTreeMap, fmt, time::Duration};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Locator of the remote resource a request acts upon.
///
/// # Examples
///
/// ```
/// use queryable::Target;
///
/// let target = Target::new("https://example/resource");
/// assert_eq!(target.as_str(), "https://example/resource");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Wrap a resource locator.
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self { Self(locator.into()) }

    /// Borrow the locator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Return a target with `segment` appended, separated by a single `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use queryable::Target;
    ///
    /// let web = Target::new("https://example/sites/dev/");
    /// assert_eq!(web.join("/lists").as_str(), "https://example/sites/dev/lists");
    /// ```
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        let tail = segment.trim_start_matches('/');
        Self(format!("{base}/{tail}"))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self { Self::new(value) }
}

impl From<String> for Target {
    fn from(value: String) -> Self { Self(value) }
}

/// Request verb understood by transports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a resource.
    #[default]
    Get,
    /// Create a resource or invoke an action.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

/// Transport-level proxy settings attached to outbound requests.
///
/// The pipeline never interprets these values; they are handed to the
/// transport as part of [`RequestConfig::agent`].
///
/// # Examples
///
/// ```
/// use queryable::ProxyAgent;
///
/// let agent = ProxyAgent::new("http://proxy.local:3128").no_proxy(["localhost"]);
/// assert_eq!(agent.endpoint(), "http://proxy.local:3128");
/// assert!(agent.bypasses("localhost"));
/// assert!(!agent.bypasses("example"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyAgent {
    endpoint: String,
    #[serde(default)]
    no_proxy: Vec<String>,
}

impl ProxyAgent {
    /// Create an agent routing traffic through `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            no_proxy: Vec::new(),
        }
    }

    /// Hosts that should bypass the proxy.
    #[must_use]
    pub fn no_proxy<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_proxy.extend(hosts.into_iter().map(Into::into));
        self
    }

    /// Proxy endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// Returns true if `host` is listed as a proxy bypass.
    #[must_use]
    pub fn bypasses(&self, host: &str) -> bool { self.no_proxy.iter().any(|h| h == host) }
}

/// Transport options shaped by observers before the transport call.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use queryable::{Method, RequestConfig};
///
/// let config = RequestConfig::default()
///     .method(Method::Post)
///     .header("Accept", "application/json")
///     .timeout(Duration::from_secs(30));
/// assert_eq!(config.method, Method::Post);
/// assert_eq!(config.headers.get("Accept").map(String::as_str), Some("application/json"));
/// assert!(config.agent.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Request verb.
    pub method: Method,
    /// Header name to value. Names are stored as given.
    pub headers: BTreeMap<String, String>,
    /// Optional request body.
    pub body: Option<Bytes>,
    /// Transport timeout, if any.
    pub timeout: Option<Duration>,
    /// Proxy agent the transport should route through.
    pub agent: Option<ProxyAgent>,
}

impl RequestConfig {
    /// Set the request verb.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Insert or replace a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the transport timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the proxy agent.
    #[must_use]
    pub fn agent(mut self, agent: ProxyAgent) -> Self {
        self.agent = Some(agent);
        self
    }
}

/// The `(target, config, result)` triple every observer consumes and returns.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestState<R> {
    /// What the request acts upon.
    pub target: Target,
    /// Options handed to the transport at the `Send` moment.
    pub config: RequestConfig,
    /// Accumulated outcome; `None` until the transport responds.
    pub result: Option<R>,
}

impl<R> RequestState<R> {
    /// Create a state with no result yet.
    #[must_use]
    pub fn new(target: impl Into<Target>, config: RequestConfig) -> Self {
        Self {
            target: target.into(),
            config,
            result: None,
        }
    }

    /// Split the state into its three parts.
    pub fn into_parts(self) -> (Target, RequestConfig, Option<R>) {
        (self.target, self.config, self.result)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://example/web", "lists", "https://example/web/lists")]
    #[case("https://example/web/", "/lists", "https://example/web/lists")]
    #[case("https://example/web//", "lists/", "https://example/web/lists/")]
    fn join_uses_single_separator(#[case] base: &str, #[case] seg: &str, #[case] expected: &str) {
        assert_eq!(Target::new(base).join(seg).as_str(), expected);
    }

    #[test]
    fn new_state_has_no_result() {
        let state: RequestState<u8> = RequestState::new("t", RequestConfig::default());
        let (target, config, result) = state.into_parts();
        assert_eq!(target.as_str(), "t");
        assert_eq!(config, RequestConfig::default());
        assert!(result.is_none());
    }

    #[test]
    fn request_config_builders_set_fields() {
        let agent = ProxyAgent::new("http://proxy:8080");
        let config = RequestConfig::default()
            .header("X-A", "1")
            .header("X-A", "2")
            .body(Bytes::from_static(b"payload"))
            .agent(agent.clone());
        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.headers["X-A"], "2");
        assert_eq!(config.body.as_deref(), Some(&b"payload"[..]));
        assert_eq!(config.agent, Some(agent));
    }
}
