//! Shared HTTP client for the wire layer.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::config::HttpClientConfig;
use super::error::ApiError;

/// Thin wrapper around [`reqwest::Client`] handling status triage and JSON
/// decoding. One instance per probe invocation; never cached.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig, user_agent: Option<&str>) -> Result<Self, ApiError> {
        let default_ua = format!("gemini-doctor/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// POST a JSON body and parse a JSON reply.
    #[tracing::instrument(name = "http_post_json", skip(self, headers, body), fields(url = %url), err)]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, ApiError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let res = self.send(url, headers, body).await?;
        let status = res.status();
        debug!(status = %status, "HTTP request successful");

        let body_text = res.text().await.map_err(|e| ApiError::Parse {
            message: "failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&body_text).map_err(|e| ApiError::Parse {
            message: "failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }

    /// POST a JSON body and hand back the raw response for streaming
    /// consumption. Status triage happens here so the caller only ever sees
    /// a body it is allowed to drain.
    #[tracing::instrument(name = "http_post_sse", skip(self, headers, body), fields(url = %url), err)]
    pub async fn post_sse<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<reqwest::Response, ApiError>
    where
        Req: Serialize,
    {
        self.send(url, headers, body).await
    }

    async fn send<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<reqwest::Response, ApiError>
    where
        Req: Serialize,
    {
        let mut req = self.client.post(url).json(body);
        for (name, value) in headers {
            req = req.header(name, value);
        }

        let res = req.send().await.map_err(|e| ApiError::Network {
            message: format!("request failed: {e}"),
            source: Box::new(e),
        })?;

        let status = res.status();
        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            let error_text = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api {
                message: error_text,
                status_code: Some(status.as_u16()),
            });
        }

        Ok(res)
    }
}
