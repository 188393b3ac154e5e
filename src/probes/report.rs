//! The uniform outcome record every probe returns.

use serde::Serialize;

use crate::core::error::ProbeError;

/// Outcome of one probe invocation. Constructed once, immutable, never
/// persisted. A failed probe always carries the captured failure text; a
/// passed probe never does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ProbeData>,
}

/// Probe-specific diagnostic detail, one variant per probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "probe", rename_all = "snake_case")]
pub enum ProbeData {
    Connectivity {
        model: String,
        reply: String,
    },
    Generation {
        model: String,
        prompt: String,
        output: String,
    },
    Streaming {
        model: String,
        chunk_count: usize,
        full_text: String,
    },
    TokenCount {
        model: String,
        total_tokens: u32,
    },
    Vision {
        model: String,
        output: String,
    },
    SystemInstruction {
        model: String,
        output: String,
    },
    Embedding {
        model: String,
        vector_length: usize,
    },
}

impl ProbeReport {
    pub(crate) fn pass(message: impl Into<String>, data: ProbeData) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub(crate) fn fail(error: &ProbeError) -> Self {
        Self::fail_with(error.to_string())
    }

    pub(crate) fn fail_with(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
