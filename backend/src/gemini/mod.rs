pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::analysis::prompt::AnalysisPrompt;
use client::GeminiError;
use models::GenerateContentResponse;

/// A multimodal model that turns an image plus instruction into candidates.
///
/// Implementations are shared across concurrent requests and must not keep
/// per-request state.
#[async_trait]
pub trait InferenceCapability: Send + Sync {
    async fn generate_content(
        &self,
        prompt: &AnalysisPrompt,
    ) -> Result<GenerateContentResponse, GeminiError>;
}
