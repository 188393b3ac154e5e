//! Typed plumbing for the Gemini v1beta REST surface: the four remote
//! capabilities the suite exercises, their wire types, and SSE decoding for
//! the streaming variant.

pub mod client;
pub mod constants;
pub mod stream;
pub mod wire;

pub use client::GeminiClient;
pub use stream::TextStream;
