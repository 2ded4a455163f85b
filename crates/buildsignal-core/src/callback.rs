//! HTTP client for the callback (wait handle) endpoint.
//!
//! Sends a [`CompletionSignal`] as a JSON body with a single PUT. There is no
//! retry: a failed delivery is returned to the caller.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::DeliveryError;
use crate::signal::CompletionSignal;

/// Client that PUTs completion signals to a callback URL.
#[derive(Debug, Clone)]
pub struct CallbackClient {
    http: reqwest::Client,
}

impl CallbackClient {
    /// Build a client, optionally bounding each request by `timeout`.
    ///
    /// The workspace builds `reqwest` without a bundled TLS provider, so the
    /// `ring` provider is installed here (no-op if one is already installed).
    pub fn new(timeout: Option<Duration>) -> Result<Self, DeliveryError> {
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;

        Ok(Self { http })
    }

    /// PUT `signal` to `url`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Request` or `DeliveryError::Timeout` if the
    /// request cannot be completed, or `DeliveryError::Rejected` if the
    /// endpoint answers with a non-2xx status code.
    pub async fn put_signal(
        &self,
        url: &str,
        signal: &CompletionSignal,
    ) -> Result<(), DeliveryError> {
        let response = self.http.put(url).json(signal).send().await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Completion signal accepted");
            Ok(())
        } else {
            let status_code = status.as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            warn!(status = status_code, body = %body, "Callback endpoint rejected signal");
            Err(DeliveryError::Rejected {
                status: status_code,
                body,
            })
        }
    }
}
