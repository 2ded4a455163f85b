//! Inbound notification model.
//!
//! The bus delivers an SNS-shaped envelope whose records each carry a
//! JSON-encoded lifecycle event as a string. Only the fields the relay reads
//! are modelled; everything else is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// Outer delivery wrapper from the message bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

/// A single delivery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

/// The bus message inside a record. `message` is the serialized event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Build pipeline lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub state: BuildState,
    /// Identifier of the build instance that produced the event.
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub status: BuildStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Pipeline build status. Unrecognised values are kept verbatim and are
/// treated like any other non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    Pending,
    Creating,
    Building,
    Testing,
    Distributing,
    Integrating,
    Available,
    Cancelled,
    Failed,
    Deprecated,
    Deleted,
    Disabled,
    Unknown(String),
}

impl BuildStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Creating => "CREATING",
            Self::Building => "BUILDING",
            Self::Testing => "TESTING",
            Self::Distributing => "DISTRIBUTING",
            Self::Integrating => "INTEGRATING",
            Self::Available => "AVAILABLE",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Deprecated => "DEPRECATED",
            Self::Deleted => "DELETED",
            Self::Disabled => "DISABLED",
            Self::Unknown(s) => s.as_str(),
        }
    }

    /// Only `AVAILABLE` means the build succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<String> for BuildStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => Self::Pending,
            "CREATING" => Self::Creating,
            "BUILDING" => Self::Building,
            "TESTING" => Self::Testing,
            "DISTRIBUTING" => Self::Distributing,
            "INTEGRATING" => Self::Integrating,
            "AVAILABLE" => Self::Available,
            "CANCELLED" => Self::Cancelled,
            "FAILED" => Self::Failed,
            "DEPRECATED" => Self::Deprecated,
            "DELETED" => Self::Deleted,
            "DISABLED" => Self::Disabled,
            _ => Self::Unknown(s),
        }
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        match status {
            BuildStatus::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NotificationEnvelope {
    /// Deserialize an envelope from the raw invocation payload.
    pub fn from_value(raw: Value) -> Result<Self> {
        serde_json::from_value(raw)
            .map_err(|e| Error::Parse(format!("invalid notification envelope: {e}")))
    }

    /// Decode the lifecycle event carried by the first record.
    ///
    /// Batches are not supported: extra records are logged and dropped.
    pub fn first_event(&self) -> Result<LifecycleEvent> {
        let record = self
            .records
            .first()
            .ok_or_else(|| Error::Parse("notification envelope has no records".into()))?;

        if self.records.len() > 1 {
            warn!(
                ignored = self.records.len() - 1,
                "Envelope carries multiple records; only the first is processed"
            );
        }

        LifecycleEvent::from_message(&record.sns.message)
    }
}

impl LifecycleEvent {
    /// Parse the JSON string carried in a bus message.
    pub fn from_message(message: &str) -> Result<Self> {
        serde_json::from_str(message)
            .map_err(|e| Error::Parse(format!("invalid lifecycle event payload: {e}")))
    }
}
