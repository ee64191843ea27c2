use url::Url;

use crate::{ConfigError, ProbeRequest, RunConfig, ValidUrl, PLACEHOLDER};

/// Materializes the probe window `[start_value, start_value + look_ahead]`
/// into one request per value, ascending.
///
/// Fails if the template does not carry exactly one placeholder or a
/// materialized URL does not parse.
pub fn plan(config: &RunConfig) -> Result<Vec<ProbeRequest>, ConfigError> {
    config.validate_template()?;

    let end = config.start_value + u64::from(config.look_ahead);
    let mut requests = Vec::with_capacity(config.look_ahead as usize + 1);
    for value in config.start_value..=end {
        let url = config
            .url_template
            .replacen(PLACEHOLDER, &value.to_string(), 1);
        Url::parse(&url).map_err(|err| ConfigError::InvalidUrl {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        requests.push(ProbeRequest { url, value });
    }
    Ok(requests)
}

/// Slides the window past the highest newly confirmed value.
///
/// Returns the config unchanged when sliding is disabled or nothing new was
/// confirmed. New values are >= the old `start_value` by construction, so
/// the update never decreases it.
pub fn advance(config: RunConfig, new_valid: &[ValidUrl]) -> RunConfig {
    if !config.slide_window {
        return config;
    }
    let Some(highest) = new_valid.iter().map(|v| v.value).max() else {
        return config;
    };
    RunConfig {
        start_value: highest + 1,
        ..config
    }
}
