pub mod config;
pub mod error;
pub mod http;

pub use config::{GeminiConfig, HttpClientConfig};
pub use error::{ApiError, ProbeError};
pub use http::HttpClient;
