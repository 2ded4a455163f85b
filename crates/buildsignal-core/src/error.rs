//! Error types for `buildsignal` core library.

use thiserror::Error;

/// Result type alias using the relay [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a relay invocation.
///
/// A correlation mismatch is not an error; see [`crate::relay::RelayOutcome`].
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing. Indicates a deployment defect and is
    /// never retriable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The inbound envelope or its event payload does not have the expected
    /// shape.
    #[error("Failed to parse notification: {0}")]
    Parse(String),

    /// The completion signal could not be delivered to the callback endpoint.
    #[error("Failed to deliver completion signal: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Failures of the outbound PUT to the callback endpoint.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Transport-level failure (DNS, connect, TLS, body write).
    #[error("request error: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The endpoint answered with a non-success status code.
    #[error("callback endpoint rejected signal (status {status}): {body}")]
    Rejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body returned by the endpoint.
        body: String,
    },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

impl Error {
    /// Whether the host may reasonably retry the invocation.
    ///
    /// Configuration and parse failures will fail the same way on every
    /// replay, as will an HTTP client that could not be built. Only failures
    /// of the PUT itself qualify.
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Delivery(
                DeliveryError::Request(_)
                    | DeliveryError::Timeout(_)
                    | DeliveryError::Rejected { .. }
            )
        )
    }
}
