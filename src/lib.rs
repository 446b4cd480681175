#![doc(html_root_url = "https://docs.rs/queryable/latest")]
//! Public API for the `queryable` library.
//!
//! This crate provides the request-lifecycle machinery a remote-resource
//! client is built on: a moment-based asynchronous [`Pipeline`] that
//! independently authored [`Behavior`]s extend, and a bounded poller for
//! waiting on eventually-consistent remote state.

pub mod behavior;
pub mod error;
pub mod metrics;
pub mod moment;
pub mod observer;
pub mod pipeline;
pub mod poll;
pub mod prelude;
pub mod state;
pub mod transport;

mod tracing_config;
mod tracing_helpers;

pub use behavior::{Agent, Behavior, DefaultHeaders, Logging, Timeout};
pub use error::{BoxError, PipelineError};
pub use moment::Moment;
pub use observer::{BoxFuture, ErrorObserver, Observer, ObserverFuture, error_observer, observer};
pub use pipeline::{MomentHandle, Pipeline};
pub use poll::{PollConfig, PollOutcome, poll_until, poll_until_true};
pub use state::{Method, ProxyAgent, RequestConfig, RequestState, Target};
pub use tracing_config::TracingConfig;
pub use transport::{FnTransport, Transport, transport_fn};
