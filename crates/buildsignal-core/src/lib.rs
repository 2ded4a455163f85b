//! `buildsignal` Core Library
//!
//! Turns build pipeline lifecycle notifications into completion signals for
//! an orchestrator blocked on a wait handle:
//! - Notification envelope and lifecycle event model
//! - Watch-target correlation and status mapping
//! - Callback HTTP client
//! - Relay configuration and error types

pub mod callback;
pub mod config;
pub mod error;
pub mod event;
pub mod relay;
pub mod signal;
pub mod tracing_init;

pub use callback::CallbackClient;
pub use config::RelayConfig;
pub use error::{DeliveryError, Error, Result};
pub use event::{BuildStatus, LifecycleEvent, NotificationEnvelope};
pub use relay::{RelayOutcome, SignalRelay, SkipReason};
pub use signal::{CompletionSignal, SignalStatus};
