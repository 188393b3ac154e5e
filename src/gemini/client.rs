//! The client handle behind every probe.

use crate::core::config::GeminiConfig;
use crate::core::error::{ApiError, ProbeError};
use crate::core::http::HttpClient;

use super::constants;
use super::stream::{TextStream, decode_sse_body};
use super::wire::{
    CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse,
    GenerateContentRequest, GenerateContentResponse,
};

/// A handle bound to one credential, exposing the four remote capabilities
/// the suite exercises. Acquired per probe invocation, used once, dropped —
/// never cached or pooled.
pub struct GeminiClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Fails with [`ProbeError::Configuration`] when the credential is absent
    /// or empty, so a missing key travels through the same funnel as every
    /// other probe failure.
    pub fn new(config: &GeminiConfig) -> Result<Self, ProbeError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProbeError::Configuration)?
            .to_string();

        let http = HttpClient::new(&config.http, None).map_err(ProbeError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    fn endpoint(&self, model: &str, verb: &str) -> String {
        format!("{}/models/{model}:{verb}", self.base_url)
    }

    fn auth_headers(&self) -> [(String, String); 1] {
        [(constants::API_KEY_HEADER.to_string(), self.api_key.clone())]
    }

    /// Single-shot `generateContent`.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = self.endpoint(model, "generateContent");
        self.http.post_json(&url, &self.auth_headers(), request).await
    }

    /// `streamGenerateContent` over SSE. The returned stream yields one text
    /// fragment per received chunk, in arrival order.
    pub async fn stream_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<TextStream, ApiError> {
        let url = format!("{}?alt=sse", self.endpoint(model, "streamGenerateContent"));
        let response = self.http.post_sse(&url, &self.auth_headers(), request).await?;
        Ok(decode_sse_body(response.bytes_stream()))
    }

    /// `countTokens` for a content payload.
    pub async fn count_tokens(
        &self,
        model: &str,
        request: &CountTokensRequest,
    ) -> Result<CountTokensResponse, ApiError> {
        let url = self.endpoint(model, "countTokens");
        self.http.post_json(&url, &self.auth_headers(), request).await
    }

    /// `embedContent` against an embedding-capable model.
    pub async fn embed_content(
        &self,
        model: &str,
        request: &EmbedContentRequest,
    ) -> Result<EmbedContentResponse, ApiError> {
        let url = self.endpoint(model, "embedContent");
        self.http.post_json(&url, &self.auth_headers(), request).await
    }
}
