// src/llm/mod.rs
// LLM module exports and submodule declarations

pub mod client;
pub mod embeddings;
pub mod generate;

// Export the main client and the service seams
pub use client::OpenAIClient;
pub use embeddings::Embedder;
pub use generate::TextGenerator;
