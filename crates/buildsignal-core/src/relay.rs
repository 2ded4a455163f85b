//! The signal relay.
//!
//! One call to [`SignalRelay::handle`] per delivered envelope:
//!
//! 1. require a callback endpoint (fails before anything is parsed)
//! 2. decode the lifecycle event from the first record
//! 3. correlate its `arn` with the watch target
//! 4. map status to a [`CompletionSignal`] and PUT it to the endpoint
//!
//! The relay holds no mutable state and may be shared across concurrent
//! invocations. It never retries; the host decides what to do with errors.

use serde_json::Value;
use tracing::{info, instrument};

use crate::callback::CallbackClient;
use crate::config::RelayConfig;
use crate::error::Result;
use crate::event::NotificationEnvelope;
use crate::signal::CompletionSignal;

/// Why an invocation finished without emitting a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No watch target is configured, so no event can correlate.
    WatchTargetUnset,
    /// The event belongs to a different build.
    CorrelationMismatch {
        /// Identifier carried by the event.
        received: String,
    },
}

/// Successful result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// A signal was accepted by the callback endpoint.
    Signaled(CompletionSignal),
    /// Nothing was sent.
    Skipped(SkipReason),
}

impl RelayOutcome {
    pub const fn is_signaled(&self) -> bool {
        matches!(self, Self::Signaled(_))
    }
}

/// Translates pipeline lifecycle notifications into completion signals.
#[derive(Debug, Clone)]
pub struct SignalRelay {
    config: RelayConfig,
    client: CallbackClient,
}

impl SignalRelay {
    /// Create a relay with its own HTTP client.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = CallbackClient::new(config.request_timeout)?;
        Ok(Self { config, client })
    }

    pub const fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Handle one delivered envelope.
    ///
    /// `request_id` identifies this invocation and becomes the signal's
    /// `UniqueId`.
    ///
    /// # Errors
    ///
    /// - `Error::Config` when no callback endpoint is configured, regardless
    ///   of the envelope contents.
    /// - `Error::Parse` when the envelope or its first event is malformed.
    /// - `Error::Delivery` when the PUT fails or is rejected.
    #[instrument(skip(self, envelope))]
    pub async fn handle(&self, envelope: Value, request_id: &str) -> Result<RelayOutcome> {
        let callback_url = self.config.require_callback_url()?;

        let event = NotificationEnvelope::from_value(envelope)?.first_event()?;

        let Some(target) = self.config.watch_target() else {
            info!(arn = %event.arn, "No watch target configured; ignoring event");
            return Ok(RelayOutcome::Skipped(SkipReason::WatchTargetUnset));
        };
        if event.arn != target {
            info!(arn = %event.arn, watch_target = %target, "Event is for another build; ignoring");
            return Ok(RelayOutcome::Skipped(SkipReason::CorrelationMismatch {
                received: event.arn,
            }));
        }

        let signal = CompletionSignal::from_event(&event, request_id);
        info!(
            arn = %event.arn,
            build_status = %event.state.status,
            signal_status = ?signal.status,
            "Sending completion signal"
        );

        self.client.put_signal(callback_url, &signal).await?;

        info!("Completion signal delivered");
        Ok(RelayOutcome::Signaled(signal))
    }
}
