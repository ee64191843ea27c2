use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Substitution marker in `url_template`; must occur exactly once.
pub const PLACEHOLDER: &str = "{}";

/// Durable run configuration, stored as a JSON document between runs.
///
/// Created from environment-supplied defaults on the first run, mutated only
/// by [`crate::advance`], and persisted at the end of every successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// URL template with one integer placeholder, e.g. `https://host/{}`.
    pub url_template: String,
    /// First value of the probe window.
    pub start_value: u64,
    /// Number of values probed beyond `start_value` (0 probes only it).
    pub look_ahead: u32,
    /// Whether `start_value` advances past newly confirmed values.
    pub slide_window: bool,
    /// Subject line for the notification email.
    pub email_subject: String,
    /// Sender address for the notification email.
    pub from_email: String,
    /// Recipient address for the notification email.
    pub to_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("url template contains no {{}} placeholder: {template}")]
    MissingPlaceholder { template: String },
    #[error("url template contains more than one {{}} placeholder: {template}")]
    AmbiguousPlaceholder { template: String },
    #[error("materialized url does not parse: {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl RunConfig {
    /// Validates the template without materializing any URLs.
    pub fn validate_template(&self) -> Result<(), ConfigError> {
        match self.url_template.matches(PLACEHOLDER).count() {
            0 => Err(ConfigError::MissingPlaceholder {
                template: self.url_template.clone(),
            }),
            1 => Ok(()),
            _ => Err(ConfigError::AmbiguousPlaceholder {
                template: self.url_template.clone(),
            }),
        }
    }
}
