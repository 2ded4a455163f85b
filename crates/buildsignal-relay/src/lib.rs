//! buildsignal relay host
//!
//! Wires [`SignalRelay`] into the AWS Lambda runtime:
//! - command-line / environment configuration
//! - per-invocation handler that feeds the Lambda request id through as the
//!   signal's `UniqueId`
//! - one-shot replay of an envelope stored on disk

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use lambda_runtime::LambdaEvent;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use buildsignal_core::config::{CALLBACK_URL_ENV, WATCH_TARGET_ENV};
use buildsignal_core::{RelayConfig, RelayOutcome, SignalRelay, SkipReason};

#[derive(Parser, Debug, Clone)]
#[command(name = "buildsignal-relay")]
#[command(
    version,
    about = "buildsignal relay - signals a wait handle when a watched build finishes"
)]
pub struct RelayArgs {
    /// Wait handle URL that receives the completion signal.
    #[arg(long, env = CALLBACK_URL_ENV)]
    pub callback_url: Option<String>,

    /// Identifier (ARN) of the build to react to.
    #[arg(long, env = WATCH_TARGET_ENV)]
    pub watch_target: Option<String>,

    /// Timeout for the outbound PUT, in seconds. Unset leaves it to the host.
    #[arg(long, env = "BUILDSIGNAL_CALLBACK_TIMEOUT_SECS")]
    pub callback_timeout_secs: Option<u64>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long, env = "BUILDSIGNAL_LOG_JSON")]
    pub log_json: bool,

    /// Process a single envelope from this JSON file instead of running
    /// under the Lambda runtime.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Request id to use with --replay. Defaults to a random UUID.
    #[arg(long, requires = "replay")]
    pub request_id: Option<String>,
}

impl RelayArgs {
    pub fn relay_config(&self) -> RelayConfig {
        let mut config = RelayConfig::new();
        if let Some(url) = &self.callback_url {
            config = config.with_callback_url(url.clone());
        }
        if let Some(target) = &self.watch_target {
            config = config.with_watch_target(target.clone());
        }
        if let Some(secs) = self.callback_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// What the invocation returns to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationSummary {
    pub signaled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<buildsignal_core::SignalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<&'static str>,
}

impl From<&RelayOutcome> for InvocationSummary {
    fn from(outcome: &RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Signaled(signal) => Self {
                signaled: true,
                status: Some(signal.status),
                skipped: None,
            },
            RelayOutcome::Skipped(reason) => Self {
                signaled: false,
                status: None,
                skipped: Some(match reason {
                    SkipReason::WatchTargetUnset => "watch_target_unset",
                    SkipReason::CorrelationMismatch { .. } => "correlation_mismatch",
                }),
            },
        }
    }
}

/// Lambda handler: one envelope per invocation.
///
/// Relay errors are returned as-is so the runtime reports the invocation as
/// failed.
pub async fn handle_event(
    relay: &SignalRelay,
    event: LambdaEvent<Value>,
) -> Result<InvocationSummary, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    match relay.handle(payload, &context.request_id).await {
        Ok(outcome) => {
            info!(signaled = outcome.is_signaled(), "Invocation finished");
            Ok(InvocationSummary::from(&outcome))
        }
        Err(e) => {
            error!(error = %e, retriable = e.is_retriable(), "Invocation failed");
            Err(e.into())
        }
    }
}

/// Run the relay once against an envelope stored in `path`.
pub async fn replay_file(
    relay: &SignalRelay,
    path: &Path,
    request_id: &str,
) -> anyhow::Result<RelayOutcome> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read envelope {}: {e}", path.display()))?;
    let envelope: Value = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse envelope {}: {e}", path.display()))?;

    info!(path = %path.display(), request_id, "Replaying envelope");
    Ok(relay.handle(envelope, request_id).await?)
}
