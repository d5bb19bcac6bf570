// src/llm/generate.rs

//! The completion-service seam.
//!
//! Everything that needs generated text (the planner, the SQL generator, the
//! product summarizer) goes through this trait, so tests can script responses
//! without a network.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Given a prompt, return generated text. Failures are opaque to callers.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
