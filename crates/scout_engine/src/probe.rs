use std::time::Duration;

use futures_util::{stream, StreamExt};
use thiserror::Error;

use scout_core::{FailureReason, ProbeOutcome, ProbeRequest, ProbeResult};

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound on simultaneous in-flight requests.
    pub max_in_flight: usize,
    /// Optional deadline for the whole probe phase.
    pub run_deadline: Option<Duration>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_in_flight: 16,
            run_deadline: None,
        }
    }
}

/// Executor-level failures only; individual request failures classify into
/// the per-request [`ProbeOutcome`] and never abort the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("probe phase exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Issues one GET per request concurrently and returns a classified
    /// result for every request, in input order.
    async fn probe(&self, requests: &[ProbeRequest]) -> Result<Vec<ProbeResult>, ProbeError>;
}

pub struct ReqwestProber {
    client: reqwest::Client,
    settings: ProbeSettings,
}

impl ReqwestProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ProbeError::Client(err.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn probe_one(&self, request: &ProbeRequest) -> ProbeResult {
        let outcome = match self.client.get(&request.url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if status == 200 {
                    ProbeOutcome::Success { status }
                } else {
                    ProbeOutcome::Failure {
                        reason: FailureReason::HttpStatus(status),
                    }
                }
            }
            Err(err) => ProbeOutcome::Failure {
                reason: map_reqwest_error(&err),
            },
        };
        ProbeResult {
            url: request.url.clone(),
            value: request.value,
            outcome,
        }
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, requests: &[ProbeRequest]) -> Result<Vec<ProbeResult>, ProbeError> {
        // `buffered` joins completions back in input order, so the result at
        // index i always corresponds to the request at index i.
        let futures: Vec<_> = requests
            .iter()
            .map(|request| self.probe_one(request))
            .collect();
        let join = stream::iter(futures)
            .buffered(self.settings.max_in_flight.max(1))
            .collect::<Vec<_>>();

        match self.settings.run_deadline {
            Some(deadline) => tokio::time::timeout(deadline, join)
                .await
                .map_err(|_| ProbeError::DeadlineExceeded(deadline)),
            None => Ok(join.await),
        }
    }
}

fn map_reqwest_error(err: &reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        return FailureReason::Timeout;
    }
    if err.is_builder() {
        return FailureReason::InvalidUrl;
    }
    FailureReason::Network
}
