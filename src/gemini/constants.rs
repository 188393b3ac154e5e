pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Embedding is not universally supported by the generation models, so the
/// embedding probe targets a dedicated model by default.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
