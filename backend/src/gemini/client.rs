use async_trait::async_trait;
use reqwest::Client as HttpClient;
use thiserror::Error;
use url::Url;

use super::InferenceCapability;
use super::models::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::analysis::prompt::AnalysisPrompt;

/// Multimodal model every analysis is sent to.
pub const MODEL_ID: &str = "gemini-2.0-flash-exp";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("URL parsing failed: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: &str) -> Result<Self, GeminiError> {
        // Url::join replaces the last segment unless the base ends with a slash
        let mut base = api_base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint =
            Url::parse(&base)?.join(&format!("v1beta/models/{}:generateContent", MODEL_ID))?;

        let http_client = HttpClient::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }

    pub fn model(&self) -> &'static str {
        MODEL_ID
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceCapability for GeminiClient {
    async fn generate_content(
        &self,
        prompt: &AnalysisPrompt,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let request = GenerateContentRequest::from(prompt);

        log::debug!(
            "Sending {} image bytes ({}) to {}",
            prompt.image.len(),
            prompt.format,
            MODEL_ID
        );

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: ApiErrorEnvelope::message_from(&error_text),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_targets_generate_content_for_the_model() {
        let client =
            GeminiClient::new("key".to_string(), "https://generativelanguage.googleapis.com")
                .unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
        assert_eq!(client.model(), MODEL_ID);
    }

    #[test]
    fn base_path_is_preserved() {
        let client = GeminiClient::new("key".to_string(), "http://localhost:9000/proxy").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:9000/proxy/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }

    #[test]
    fn invalid_base_fails_construction() {
        let err = GeminiClient::new("key".to_string(), "not a url").err().unwrap();
        assert!(matches!(err, GeminiError::UrlError(_)));
    }

    #[test]
    fn api_error_display() {
        let err = GeminiError::Api {
            status: 503,
            message: "The model is overloaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Gemini API error (503): The model is overloaded"
        );
    }
}
