//! Scout core: pure window planning, diffing, and digest helpers.
mod config;
mod diff;
mod digest;
mod types;
mod window;

pub use config::{ConfigError, RunConfig, PLACEHOLDER};
pub use diff::{diff, DiffOutcome};
pub use digest::render_digest;
pub use types::{
    FailureReason, ProbeOutcome, ProbeRequest, ProbeResult, RunSummary, SeenUrls, ValidUrl,
};
pub use window::{advance, plan};
