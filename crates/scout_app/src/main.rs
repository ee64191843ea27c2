//! Entry point for the scout binary: one probe run per invocation.
//!
//! An external scheduler triggers the process; the run result is printed to
//! stdout as a `{statusCode, body}` JSON document.

mod env;
mod logging;

use std::sync::Arc;

use chrono::Utc;
use scout_core::RunSummary;
use scout_engine::{
    DirObjectStore, HttpMailer, NotifyGate, ProbeSettings, ReqwestProber, RunError, Runner,
    StateStore,
};
use scout_logging::{scout_error, scout_info};
use serde_json::json;

#[tokio::main]
async fn main() {
    let settings = match env::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("invalid environment: {err:#}");
            std::process::exit(1);
        }
    };
    logging::initialize(&settings.log_level);

    match run(&settings).await {
        Ok(summary) => {
            let response = json!({
                "statusCode": 200,
                "body": {
                    "all_valid_urls": summary.all_valid,
                    "new_valid_urls": summary.new_valid,
                },
            });
            println!("{response}");
        }
        Err(err) => {
            scout_error!("Run failed: {}", err);
            let response = json!({
                "statusCode": 500,
                "body": {
                    "error": err.kind(),
                    "message": err.to_string(),
                },
            });
            println!("{response}");
            std::process::exit(1);
        }
    }
}

async fn run(settings: &env::AppSettings) -> Result<RunSummary, RunError> {
    let store = StateStore::new(
        Arc::new(DirObjectStore::new(settings.store_dir.clone())),
        settings.bucket.clone(),
        settings.config_key.clone(),
        settings.seen_key.clone(),
    );

    let probe_settings = ProbeSettings {
        request_timeout: settings.request_timeout,
        max_in_flight: settings.max_in_flight,
        ..ProbeSettings::default()
    };
    let prober = Arc::new(ReqwestProber::new(probe_settings)?);
    let mailer = Arc::new(HttpMailer::new(settings.mail_endpoint.clone())?);
    let gate = NotifyGate::new(mailer, Arc::new(|| Utc::now().to_rfc3339()));

    scout_info!(
        "Starting probe run against bucket {} in {:?}.",
        settings.bucket,
        settings.store_dir
    );
    Runner::new(store, prober, gate, settings.defaults.clone())
        .run()
        .await
}
