//! The diagnostic suite: seven independent probes, each exercising one API
//! capability end-to-end and returning the uniform [`ProbeReport`].
//!
//! Probes share no state beyond the borrowed configuration, so they can be
//! run in any order or concurrently; [`run_all`] does the latter.

pub mod report;
mod suite;

use std::fmt;

use futures::future;

pub use report::{ProbeData, ProbeReport};
pub use suite::{
    connectivity, embedding, streaming, system_instruction, text_generation, token_count, vision,
};

use crate::core::config::GeminiConfig;

/// Names the seven probes, in suite order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    Connectivity,
    TextGeneration,
    Streaming,
    TokenCount,
    Vision,
    SystemInstruction,
    Embedding,
}

impl Probe {
    pub const ALL: [Probe; 7] = [
        Probe::Connectivity,
        Probe::TextGeneration,
        Probe::Streaming,
        Probe::TokenCount,
        Probe::Vision,
        Probe::SystemInstruction,
        Probe::Embedding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Probe::Connectivity => "connectivity",
            Probe::TextGeneration => "text-generation",
            Probe::Streaming => "streaming",
            Probe::TokenCount => "token-count",
            Probe::Vision => "vision",
            Probe::SystemInstruction => "system-instruction",
            Probe::Embedding => "embedding",
        }
    }

    /// Runs this probe against its default model, or `model` when given.
    pub async fn run(self, config: &GeminiConfig, model: Option<&str>) -> ProbeReport {
        match self {
            Probe::Connectivity => connectivity(config, model).await,
            Probe::TextGeneration => text_generation(config, model).await,
            Probe::Streaming => streaming(config, model).await,
            Probe::TokenCount => token_count(config, model).await,
            Probe::Vision => vision(config, model).await,
            Probe::SystemInstruction => system_instruction(config, model).await,
            Probe::Embedding => embedding(config, model).await,
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs every probe concurrently against its default model and collects the
/// reports in suite order. Each probe holds its own client, so nothing here
/// needs synchronization.
pub async fn run_all(config: &GeminiConfig) -> Vec<(Probe, ProbeReport)> {
    let reports = future::join_all(Probe::ALL.iter().map(|probe| probe.run(config, None))).await;
    Probe::ALL.into_iter().zip(reports).collect()
}
