use std::sync::Arc;

use scout_logging::{scout_debug, scout_info};
use thiserror::Error;

use scout_core::{advance, diff, plan, ConfigError, RunConfig, RunSummary, SeenUrls};

use crate::notify::{MailError, NotifyGate};
use crate::probe::{ProbeError, Prober};
use crate::store::{StateStore, StoreError};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("probe executor error: {0}")]
    Probe(#[from] ProbeError),
    #[error("notification error: {0}")]
    Notify(#[from] MailError),
}

impl RunError {
    /// Stable error kind for the invocation-boundary response body.
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::Storage(_) => "storage",
            RunError::Config(_) => "config",
            RunError::Probe(_) => "probe",
            RunError::Notify(_) => "notify",
        }
    }
}

/// Sequences one invocation: load state, probe the window, diff against the
/// seen set, notify, then persist.
pub struct Runner {
    store: StateStore,
    prober: Arc<dyn Prober>,
    gate: NotifyGate,
    defaults: RunConfig,
}

impl Runner {
    pub fn new(
        store: StateStore,
        prober: Arc<dyn Prober>,
        gate: NotifyGate,
        defaults: RunConfig,
    ) -> Self {
        Self {
            store,
            prober,
            gate,
            defaults,
        }
    }

    /// Executes one complete run.
    ///
    /// State is persisted only after notification succeeds, so a failed run
    /// re-detects the same new URLs and re-attempts the email on the next
    /// invocation (at-least-once delivery; duplicates are possible when
    /// persistence fails after a successful send). The scheduler must not
    /// overlap concurrent runs against the same store.
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        self.store.ensure_bucket().await?;

        let config = match self.store.load_config().await? {
            Some(config) => config,
            None => {
                scout_info!("No stored config document, persisting defaults.");
                self.store.save_config(&self.defaults).await?;
                self.defaults.clone()
            }
        };
        let seen = match self.store.load_seen().await? {
            Some(seen) => seen,
            None => {
                scout_info!("No stored seen-URL document, persisting an empty set.");
                let empty = SeenUrls::new();
                self.store.save_seen(&empty).await?;
                empty
            }
        };

        let requests = plan(&config)?;
        scout_info!(
            "Probing {} candidate URLs starting at value {}.",
            requests.len(),
            config.start_value
        );
        let results = self.prober.probe(&requests).await?;
        for result in results.iter().filter(|result| !result.succeeded()) {
            scout_debug!("Probe of {} not valid: {:?}", result.url, result.outcome);
        }

        let outcome = diff(&results, &seen);
        scout_info!(
            "Run found {} valid URLs, {} of them new.",
            outcome.all_valid.len(),
            outcome.new_valid.len()
        );

        // A notification failure aborts here, before any state is written.
        self.gate
            .notify_if_new(&config, &outcome.new_valid)
            .await?;

        // The seen set is replaced with this run's full valid set, never
        // merged with history.
        let updated_seen = SeenUrls::from_valid(&outcome.all_valid);
        self.store.save_seen(&updated_seen).await?;
        let advanced = advance(config, &outcome.new_valid);
        self.store.save_config(&advanced).await?;

        Ok(RunSummary {
            all_valid: outcome.all_valid,
            new_valid: outcome.new_valid,
        })
    }
}
