//! Optional convenience imports for common pipeline workflows.
//!
//! This module is intentionally small and focused on high-frequency types.
//! Prefer importing specialised APIs directly from their owning modules.
//!
//! # Examples
//!
//! ```rust
//! use queryable::prelude::*;
//!
//! fn with_proxy<R: Send + 'static>(pipeline: Pipeline<R>) -> Pipeline<R> {
//!     pipeline.using(Agent::new(ProxyAgent::new("http://proxy:3128")))
//! }
//! # let _ = with_proxy::<()>;
//! ```

pub use crate::{
    behavior::{Agent, Behavior, DefaultHeaders, Timeout},
    error::{BoxError, PipelineError},
    moment::Moment,
    pipeline::Pipeline,
    poll::{PollConfig, PollOutcome, poll_until},
    state::{ProxyAgent, RequestConfig, RequestState, Target},
    transport::Transport,
};
