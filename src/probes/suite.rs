//! The seven probes. Each one acquires its own client, makes exactly one
//! remote call (or drains one stream), and funnels every failure into the
//! uniform report instead of propagating it.

use tokio_stream::StreamExt;
use tracing::warn;

use crate::core::config::GeminiConfig;
use crate::core::error::ProbeError;
use crate::gemini::client::GeminiClient;
use crate::gemini::constants;
use crate::gemini::wire::{
    Blob, Content, CountTokensRequest, EmbedContentRequest, GenerateContentRequest, Part, Role,
};

use super::report::{ProbeData, ProbeReport};

const PING_PROMPT: &str = "ping";
const GENERATION_PROMPT: &str = "Reply with a short greeting.";
const STREAMING_PROMPT: &str = "Count from 1 to 5.";
const TOKEN_COUNT_PROMPT: &str = "The quick brown fox jumps over the lazy dog.";
const VISION_PROMPT: &str = "Describe this image in one short sentence.";
const SYSTEM_INSTRUCTION: &str =
    "You are a cat. Whatever the user says, reply with exactly \"Miau!\".";
const SYSTEM_INSTRUCTION_PROMPT: &str = "Hello, how are you?";
const EXPECTED_KEYWORD: &str = "miau";
const EMBEDDING_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

/// A 1x1 transparent PNG, used as the fixed reference image for the vision
/// probe.
const PIXEL_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Round-trips a minimal "ping" request. A transport-level failure and an
/// empty reply are reported as distinct failures.
pub async fn connectivity(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_MODEL);
    match ping(config, model).await {
        Ok(reply) => ProbeReport::pass(
            format!("{model} is reachable"),
            ProbeData::Connectivity {
                model: model.to_string(),
                reply,
            },
        ),
        Err(error) => ProbeReport::fail(&error),
    }
}

async fn ping(config: &GeminiConfig, model: &str) -> Result<String, ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = GenerateContentRequest::from_prompt(PING_PROMPT);
    let reply = client.generate_content(model, &request).await?.text();
    if reply.is_empty() {
        return Err(ProbeError::EmptyResponse);
    }
    Ok(reply)
}

/// Sends a fixed single-turn prompt. Completion alone counts as success;
/// empty output is passed through rather than treated as a failure.
pub async fn text_generation(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_MODEL);
    match generate(config, model).await {
        Ok(output) => ProbeReport::pass(
            format!("{model} completed the generation call"),
            ProbeData::Generation {
                model: model.to_string(),
                prompt: GENERATION_PROMPT.to_string(),
                output,
            },
        ),
        Err(error) => ProbeReport::fail(&error),
    }
}

async fn generate(config: &GeminiConfig, model: &str) -> Result<String, ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = GenerateContentRequest::from_prompt(GENERATION_PROMPT);
    Ok(client.generate_content(model, &request).await?.text())
}

/// Drains an incremental response, concatenating fragments in arrival order.
/// A failure partway through aborts the probe; partial text is discarded.
pub async fn streaming(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_MODEL);
    match drain(config, model).await {
        Ok((chunk_count, full_text)) => ProbeReport::pass(
            format!("{model} streamed {chunk_count} chunks"),
            ProbeData::Streaming {
                model: model.to_string(),
                chunk_count,
                full_text,
            },
        ),
        Err(error) => ProbeReport::fail(&error),
    }
}

async fn drain(config: &GeminiConfig, model: &str) -> Result<(usize, String), ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = GenerateContentRequest::from_prompt(STREAMING_PROMPT);
    let mut fragments = client.stream_generate_content(model, &request).await?;

    let mut full_text = String::new();
    let mut chunk_count = 0usize;
    while let Some(fragment) = fragments.next().await {
        full_text.push_str(&fragment?);
        chunk_count += 1;
    }
    Ok((chunk_count, full_text))
}

/// Asks `countTokens` for a fixed prompt and reports the count as-is, with
/// no plausibility check.
pub async fn token_count(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_MODEL);
    match count(config, model).await {
        Ok(total_tokens) => ProbeReport::pass(
            format!("{model} counted {total_tokens} tokens"),
            ProbeData::TokenCount {
                model: model.to_string(),
                total_tokens,
            },
        ),
        Err(error) => ProbeReport::fail(&error),
    }
}

async fn count(config: &GeminiConfig, model: &str) -> Result<u32, ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = CountTokensRequest {
        contents: vec![Content::user_text(TOKEN_COUNT_PROMPT)],
    };
    Ok(client.count_tokens(model, &request).await?.total_tokens)
}

/// Sends one inline reference image plus a text instruction. The failure
/// message names the model so unsupported variants are distinguishable.
pub async fn vision(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_MODEL);
    match describe_image(config, model).await {
        Ok(output) => ProbeReport::pass(
            format!("{model} accepted multimodal input"),
            ProbeData::Vision {
                model: model.to_string(),
                output,
            },
        ),
        Err(error) => {
            ProbeReport::fail_with(format!("multimodal request to {model} failed: {error}"))
        }
    }
}

async fn describe_image(config: &GeminiConfig, model: &str) -> Result<String, ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = GenerateContentRequest {
        contents: vec![Content {
            role: Some(Role::User),
            parts: vec![
                Part::InlineData(Blob {
                    mime_type: "image/png".to_string(),
                    data: PIXEL_PNG_BASE64.to_string(),
                }),
                Part::Text(VISION_PROMPT.to_string()),
            ],
        }],
        system_instruction: None,
        generation_config: None,
    };
    Ok(client.generate_content(model, &request).await?.text())
}

/// Mandates a reply keyword through the system-instruction side channel and
/// checks the output actually contains it (case-insensitive substring). This
/// is the one probe where a successful call can still fail the check.
pub async fn system_instruction(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_MODEL);
    match follow_instruction(config, model).await {
        Ok(output) => ProbeReport::pass(
            format!("{model} followed the system instruction"),
            ProbeData::SystemInstruction {
                model: model.to_string(),
                output,
            },
        ),
        Err(error) => ProbeReport::fail(&error),
    }
}

async fn follow_instruction(config: &GeminiConfig, model: &str) -> Result<String, ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = GenerateContentRequest::from_prompt(SYSTEM_INSTRUCTION_PROMPT)
        .with_system_instruction(SYSTEM_INSTRUCTION);
    let output = client.generate_content(model, &request).await?.text();
    if !output.to_lowercase().contains(EXPECTED_KEYWORD) {
        return Err(ProbeError::InstructionIgnored);
    }
    Ok(output)
}

/// Embeds a fixed text with a dedicated embedding model and validates that a
/// numeric vector is actually present, reporting its length.
pub async fn embedding(config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
    let model = model.unwrap_or(constants::DEFAULT_EMBEDDING_MODEL);
    match embed(config, model).await {
        Ok(vector_length) => ProbeReport::pass(
            format!("{model} produced a {vector_length}-dimensional embedding"),
            ProbeData::Embedding {
                model: model.to_string(),
                vector_length,
            },
        ),
        Err(error) => ProbeReport::fail(&error),
    }
}

async fn embed(config: &GeminiConfig, model: &str) -> Result<usize, ProbeError> {
    let client = GeminiClient::new(config)?;
    let request = EmbedContentRequest {
        content: Content::user_text(EMBEDDING_TEXT),
    };
    let response = client.embed_content(model, &request).await?;

    let Some(embedding) = response.embedding.as_ref() else {
        warn!(response = ?response, "embedding response is missing its container");
        return Err(ProbeError::MalformedResponse { field: "embedding" });
    };
    let Some(values) = embedding.values.as_ref() else {
        warn!(response = ?response, "embedding response is missing its vector");
        return Err(ProbeError::MalformedResponse {
            field: "embedding.values",
        });
    };
    Ok(values.len())
}
