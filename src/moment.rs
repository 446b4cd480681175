//! Lifecycle moments of a pipeline execution.
//!
//! A [`Moment`] names a stage at which observers may run. The set is closed
//! and the order is global: every pipeline walks [`Moment::ORDER`] from start
//! to finish, regardless of the order in which observers were registered
//! across moments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named stage in a request's lifecycle.
///
/// # Examples
///
/// ```
/// use queryable::Moment;
///
/// assert_eq!(Moment::ORDER.first(), Some(&Moment::Pre));
/// assert!(Moment::Pre < Moment::Send);
/// assert_eq!(Moment::Parse.as_str(), "parse");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moment {
    /// Shape the outbound request: headers, proxy agent, timeouts.
    Pre,
    /// Attach credentials. The pipeline itself defines no scheme.
    Auth,
    /// Final shaping immediately before the transport call.
    Send,
    /// Transform the raw transport outcome.
    Parse,
    /// Post-process the parsed result.
    Post,
}

impl Moment {
    /// Execution order shared by every pipeline.
    pub const ORDER: [Moment; 5] = [
        Moment::Pre,
        Moment::Auth,
        Moment::Send,
        Moment::Parse,
        Moment::Post,
    ];

    /// Stable lowercase name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Moment::Pre => "pre",
            Moment::Auth => "auth",
            Moment::Send => "send",
            Moment::Parse => "parse",
            Moment::Post => "post",
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
