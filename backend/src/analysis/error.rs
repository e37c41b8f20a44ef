use actix_web::http::StatusCode;

use crate::gemini::client::GeminiError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Gemini client not initialized. Please configure the API key.")]
    NotReady,
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Invalid image data format")]
    InvalidImageData,
    #[error("Failed to decode base64 image: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Failed to generate content from Gemini: {0}")]
    Upstream(#[from] GeminiError),
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::NotReady | AnalysisError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AnalysisError::MalformedBody(_)
            | AnalysisError::InvalidImageData
            | AnalysisError::Decode(_) => StatusCode::BAD_REQUEST,
        }
    }
}
