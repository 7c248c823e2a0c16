//! OpenAI-compatible chat completions adapter

pub mod gateway;
mod types;

pub use gateway::{DEFAULT_BASE_URL, OpenAiCompatibleGateway};
