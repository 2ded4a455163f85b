//! Completion signal payload and the status mapping that produces it.

use serde::{Deserialize, Serialize};

use crate::event::LifecycleEvent;

const SUCCESS_REASON: &str = "Complete.";
const SUCCESS_DATA: &str = "Pipeline has given a SUCCESS signal from SNS.";
const FAILURE_REASON_PREFIX: &str = "Pipeline has given a FAILURE signal. ";
const FAILURE_DATA: &str = "Pipeline has given a FAILURE signal from SNS.";

/// Binary outcome reported to the waiting orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    Success,
    Failure,
}

/// Body of the PUT sent to the callback endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletionSignal {
    pub status: SignalStatus,
    pub reason: String,
    /// Request id of the invocation that emitted the signal.
    pub unique_id: String,
    pub data: String,
}

impl CompletionSignal {
    /// Map a lifecycle event to a signal attributed to `request_id`.
    ///
    /// `AVAILABLE` is the only success. Any other status fails, with the
    /// event's own reason appended to the fixed prefix (nothing appended
    /// when the event has none).
    pub fn from_event(event: &LifecycleEvent, request_id: &str) -> Self {
        if event.state.status.is_success() {
            Self {
                status: SignalStatus::Success,
                reason: SUCCESS_REASON.to_string(),
                unique_id: request_id.to_string(),
                data: SUCCESS_DATA.to_string(),
            }
        } else {
            let upstream = event.state.reason.as_deref().unwrap_or_default();
            Self {
                status: SignalStatus::Failure,
                reason: format!("{FAILURE_REASON_PREFIX}{upstream}"),
                unique_id: request_id.to_string(),
                data: FAILURE_DATA.to_string(),
            }
        }
    }
}
