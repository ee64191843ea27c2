//! Environment-derived settings, read once at process start and immutable
//! for the run's duration.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use scout_core::RunConfig;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Bucket holding the two state documents.
    pub bucket: String,
    pub config_key: String,
    pub seen_key: String,
    /// Directory the filesystem object store roots its buckets under.
    pub store_dir: PathBuf,
    /// HTTP endpoint mail is delivered through.
    pub mail_endpoint: String,
    pub log_level: String,
    /// `RunConfig` used when storage holds no config document yet.
    pub defaults: RunConfig,
    pub max_in_flight: usize,
    pub request_timeout: Duration,
}

/// Reads every setting from the environment, substituting defaults for
/// unset variables. Malformed numeric or boolean values are an error.
pub fn from_env() -> Result<AppSettings> {
    let defaults = RunConfig {
        url_template: var_or("SCOUT_URL_TEMPLATE", "https://www.example.com/{}"),
        start_value: parse_var("SCOUT_START_VALUE", 1)?,
        look_ahead: parse_var("SCOUT_LOOK_AHEAD", 6)?,
        slide_window: parse_var("SCOUT_SLIDE_WINDOW", false)?,
        email_subject: var_or("SCOUT_EMAIL_SUBJECT", "New valid URLs detected"),
        from_email: var_or("SCOUT_FROM_EMAIL", "scout@example.com"),
        to_email: var_or("SCOUT_TO_EMAIL", "operator@example.com"),
    };

    Ok(AppSettings {
        bucket: var_or("SCOUT_BUCKET", "url-scout-state"),
        config_key: var_or("SCOUT_CONFIG_KEY", "config.json"),
        seen_key: var_or("SCOUT_SEEN_KEY", "seen_urls.json"),
        store_dir: PathBuf::from(var_or("SCOUT_STORE_DIR", "./state")),
        mail_endpoint: var_or("SCOUT_MAIL_ENDPOINT", "http://localhost:8025/send"),
        log_level: var_or("SCOUT_LOG_LEVEL", "info"),
        defaults,
        max_in_flight: parse_var("SCOUT_MAX_IN_FLIGHT", 16)?,
        request_timeout: Duration::from_secs(parse_var("SCOUT_REQUEST_TIMEOUT_SECS", 30)?),
    })
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|err| anyhow!("{name} is malformed ({raw:?}): {err}"))
}
