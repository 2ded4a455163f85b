//! Relay configuration.
//!
//! Settings arrive out-of-band (environment or CLI in the relay binary) and
//! are injected into [`crate::SignalRelay`] at construction. Nothing here is
//! validated eagerly: the callback endpoint is checked at the start of every
//! invocation so a mis-wired deployment fails loudly on each event instead of
//! once at cold start.

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable carrying the callback (wait handle) URL.
pub const CALLBACK_URL_ENV: &str = "WAIT_HANDLE_URL";

/// Environment variable carrying the identifier of the watched build.
pub const WATCH_TARGET_ENV: &str = "IMAGE_BUILD_ARN";

/// Configuration for a [`crate::SignalRelay`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayConfig {
    /// URL that receives the completion signal via HTTP PUT.
    pub callback_url: Option<String>,
    /// Identifier of the build this relay reacts to.
    pub watch_target: Option<String>,
    /// Optional timeout for the outbound PUT. `None` leaves timing to the host.
    pub request_timeout: Option<Duration>,
}

impl RelayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback URL. Empty strings count as unset.
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = non_empty(url.into());
        self
    }

    /// Set the watch target. Empty strings count as unset.
    #[must_use]
    pub fn with_watch_target(mut self, target: impl Into<String>) -> Self {
        self.watch_target = non_empty(target.into());
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Return the callback URL or fail with a configuration error.
    pub fn require_callback_url(&self) -> Result<&str> {
        self.callback_url
            .as_deref()
            .ok_or_else(|| {
                Error::Config(format!("callback endpoint is not set ({CALLBACK_URL_ENV})"))
            })
    }

    pub fn watch_target(&self) -> Option<&str> {
        self.watch_target.as_deref()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
