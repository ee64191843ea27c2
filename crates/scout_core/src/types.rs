use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One candidate URL to probe, generated fresh each run. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub value: u64,
}

/// Why a probe did not count as valid. Kept for logging only; every variant
/// classifies the same way (not valid, run continues).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    HttpStatus(u16),
    Timeout,
    InvalidUrl,
    Network,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::HttpStatus(code) => write!(f, "http status {code}"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::InvalidUrl => write!(f, "invalid url"),
            FailureReason::Network => write!(f, "network error"),
        }
    }
}

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { status: u16 },
    Failure { reason: FailureReason },
}

/// Result of one probe, paired with its originating request fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    pub value: u64,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// A probe succeeded iff the response status was exactly 200.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Success { status: 200 })
    }
}

/// A URL confirmed valid in the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidUrl {
    pub url: String,
    pub value: u64,
}

/// The durable record of URLs valid as of the most recent run.
///
/// Replaced wholesale each run with the run's full successful-URL set; it is
/// not accumulated across history. Stored as a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenUrls {
    urls: BTreeSet<String>,
}

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Builds the replacement set from a run's full valid-URL list.
    pub fn from_valid(valid: &[ValidUrl]) -> Self {
        Self {
            urls: valid.iter().map(|v| v.url.clone()).collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SeenUrls {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a completed run reports back across the invocation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub all_valid: Vec<ValidUrl>,
    pub new_valid: Vec<ValidUrl>,
}
