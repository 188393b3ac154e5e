//! Explicit configuration for the suite.
//!
//! Nothing in this crate reads process-wide state on its own: the credential
//! lives in a [`GeminiConfig`] built by the caller, and [`GeminiConfig::from_env`]
//! is the single opt-in bridge to the conventional environment variable.

use std::time::Duration;

use crate::gemini::constants;

/// Transport settings for the underlying HTTP client.
///
/// There is deliberately no retry knob here: a probe reports a transient
/// failure the same way as any other failed call.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

/// Everything a probe needs to reach the API: the credential, the endpoint
/// base, and the transport settings.
///
/// An absent key is not an error at construction time. It surfaces as a
/// configuration failure inside each probe when the client is acquired, so a
/// missing key produces a normal `success: false` report instead of a crash.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub http: HttpClientConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: constants::API_BASE.to_string(),
            http: HttpClientConfig::default(),
        }
    }
}

impl GeminiConfig {
    /// Configuration with an explicitly injected credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Reads `GEMINI_API_KEY` once. An unset variable leaves the key absent
    /// rather than failing here.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(constants::API_KEY_ENV_VAR).ok(),
            ..Self::default()
        }
    }

    /// Point the suite at a different endpoint base, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
