//! Scout engine: probe execution, durable state, and notification plumbing.
mod notify;
mod probe;
mod run;
mod store;

pub use notify::{Clock, HttpMailer, MailError, Mailer, NotifyGate};
pub use probe::{ProbeError, ProbeSettings, Prober, ReqwestProber};
pub use run::{RunError, Runner};
pub use store::{DirObjectStore, ObjectStore, StateStore, StoreError};
