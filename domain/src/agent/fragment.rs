//! Generated text fragments
//!
//! A [`Fragment`] is the typed outcome of one inference call. A failed call
//! does not abort the surrounding sequence: it becomes a degraded fragment
//! whose rendered text is an `Error: ...` marker, and that marker flows
//! downstream as ordinary content.

use serde::{Deserialize, Serialize};

/// Prefix of the marker string substituted for failed generations
pub const ERROR_MARKER_PREFIX: &str = "Error: ";

/// Outcome of a single generation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Fragment {
    /// Text produced by the model
    Generated(String),
    /// The call failed; holds the failure message
    Degraded(String),
}

impl Fragment {
    pub fn generated(text: impl Into<String>) -> Self {
        Fragment::Generated(text.into())
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Fragment::Degraded(reason.into())
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Fragment::Degraded(_))
    }

    /// Text as it appears downstream: the content, or the error marker.
    pub fn text(&self) -> String {
        match self {
            Fragment::Generated(text) => text.clone(),
            Fragment::Degraded(reason) => error_marker(reason),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Fragment::Generated(text) => text,
            Fragment::Degraded(reason) => error_marker(&reason),
        }
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fragment::Generated(text) => write!(f, "{}", text),
            Fragment::Degraded(reason) => write!(f, "{}{}", ERROR_MARKER_PREFIX, reason),
        }
    }
}

/// Build the marker string for a failure message
pub fn error_marker(reason: &str) -> String {
    format!("{}{}", ERROR_MARKER_PREFIX, reason)
}

/// Whether a piece of text is an error marker
pub fn is_error_marker(text: &str) -> bool {
    text.starts_with(ERROR_MARKER_PREFIX)
}
