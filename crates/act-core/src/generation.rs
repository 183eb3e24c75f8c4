//! Generative service seam.
//!
//! Implemented by `act-interaction` against a chat-completion API. The
//! provider only ever sees free-form text back.

use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One completion call: a system framing, the instruction, and sampling limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub instruction: String,
    /// Upper bound on the reply size, in tokens.
    pub max_tokens: u32,
    /// Randomness parameter.
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        system: impl Into<String>,
        instruction: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            system: system.into(),
            instruction: instruction.into(),
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Short identifier used in logs (e.g. the model name).
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}
