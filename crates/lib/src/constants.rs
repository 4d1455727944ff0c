//! # Shared Constants
//!
//! Values that are fixed system-wide and shared by the library and the server.

/// Sampling temperature for every completion. Not user-configurable.
pub const GENERATION_TEMPERATURE: f32 = 0.75;

/// The default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The default model used for completions.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Upper bound on a single completion request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// The entry name looked up in the managed secrets file.
pub const DEFAULT_SECRET_NAME: &str = "key";

/// The environment variable consulted for the API key.
pub const DEFAULT_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
