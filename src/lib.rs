//! # gemini-doctor
//!
//! Preflight diagnostics for the Gemini API. Seven independent probes —
//! connectivity, text generation, streaming, token counting, vision,
//! system-instruction compliance, and embeddings — each make one remote call
//! and report a uniform success/message/data record. Probes never panic and
//! never return an error: every failure, from a missing API key to a
//! mid-stream disconnect, is folded into the report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gemini_doctor::{GeminiConfig, probes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GeminiConfig::from_env();
//!     for (probe, report) in probes::run_all(&config).await {
//!         let status = if report.success { "ok" } else { "FAILED" };
//!         println!("{probe}: {status} - {}", report.message);
//!     }
//! }
//! ```
//!
//! Individual probes are plain async functions taking an optional model
//! override:
//!
//! ```rust,no_run
//! # async fn run() {
//! let config = gemini_doctor::GeminiConfig::new("my-key");
//! let report = gemini_doctor::probes::vision(&config, Some("gemini-2.0-flash-lite")).await;
//! # }
//! ```

pub mod core;
pub mod gemini;
pub mod probes;

pub use crate::core::config::{GeminiConfig, HttpClientConfig};
pub use crate::core::error::{ApiError, ProbeError};
pub use crate::gemini::client::GeminiClient;
pub use crate::gemini::constants::{DEFAULT_EMBEDDING_MODEL, DEFAULT_MODEL};
pub use crate::gemini::stream::TextStream;
pub use crate::probes::{Probe, ProbeData, ProbeReport, run_all};
