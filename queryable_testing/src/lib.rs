//! Utilities for exercising [`queryable`] pipelines in tests.
//!
//! [`MockTransport`] records every request it receives and answers from a
//! script, [`MarkerLog`] collects the order in which marker observers run,
//! and [`CountingCheck`] drives the bounded poller deterministically.
//!
//! ```rust
//! use queryable::{Moment, Pipeline, RequestConfig};
//! use queryable_testing::{MarkerLog, MockTransport, marker};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let transport = MockTransport::responding("ok".to_owned());
//! let log = MarkerLog::default();
//! let result = Pipeline::new(transport.clone())
//!     .using(marker(&log, Moment::Pre, "first"))
//!     .execute("https://example/resource", RequestConfig::default())
//!     .await
//!     .unwrap();
//! assert_eq!(result, "ok");
//! assert_eq!(log.entries(), ["pre:first"]);
//! assert_eq!(transport.call_count(), 1);
//! # }
//! ```

pub mod check;
pub mod markers;
pub mod transport;

pub use check::CountingCheck;
pub use markers::{MarkerLog, marker, marker_log};
pub use transport::{MockTransport, RecordedRequest, mock_transport};
