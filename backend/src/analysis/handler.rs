use std::sync::Arc;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use dashlens_shared::{AnalysisResult, ImageFormat, ScreenshotRequest};
use log::{error, info, warn};
use uuid::Uuid;

use super::error::AnalysisError;
use super::prompt::AnalysisPrompt;
use crate::gemini::InferenceCapability;
use crate::gemini::models::GenerateContentResponse;

const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Standard alphabet with padding; non-zero trailing bits are tolerated.
const SCREENSHOT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl From<AnalysisError> for ResourceResponse {
    fn from(err: AnalysisError) -> Self {
        Self {
            status: err.status_code(),
            content_type: TEXT_CONTENT_TYPE,
            body: err.to_string().into_bytes(),
        }
    }
}

impl From<ResourceResponse> for HttpResponse {
    fn from(response: ResourceResponse) -> Self {
        HttpResponse::build(response.status)
            .content_type(response.content_type)
            .body(response.body)
    }
}

/// Turns a dashboard screenshot into the model's written analysis.
///
/// Holds no per-request state; one instance serves every concurrent call.
#[derive(Clone)]
pub struct ScreenshotHandler {
    client: Option<Arc<dyn InferenceCapability>>,
    prompt: String,
}

impl ScreenshotHandler {
    pub fn new(client: Option<Arc<dyn InferenceCapability>>, prompt: impl Into<String>) -> Self {
        Self {
            client,
            prompt: prompt.into(),
        }
    }

    /// Every per-request failure becomes a diagnostic response. Only a failure
    /// to serialize the successful result escapes as an error.
    pub async fn handle(&self, raw_body: &[u8]) -> Result<ResourceResponse, serde_json::Error> {
        let request_id = Uuid::new_v4();
        info!(
            "Screenshot analysis {} received {} bytes",
            request_id,
            raw_body.len()
        );

        match self.analyze(request_id, raw_body).await {
            Ok(result) => {
                let body = serde_json::to_vec(&result)?;
                info!(
                    "Screenshot analysis {} completed with {} characters",
                    request_id,
                    result.analysis.chars().count()
                );
                Ok(ResourceResponse {
                    status: StatusCode::OK,
                    content_type: JSON_CONTENT_TYPE,
                    body,
                })
            }
            Err(err) => {
                info!(
                    "Screenshot analysis {} rejected with {}",
                    request_id,
                    err.status_code()
                );
                Ok(ResourceResponse::from(err))
            }
        }
    }

    async fn analyze(
        &self,
        request_id: Uuid,
        raw_body: &[u8],
    ) -> Result<AnalysisResult, AnalysisError> {
        let client = self.client.as_ref().ok_or(AnalysisError::NotReady)?;

        // A `null` body carries no image data, same as `{}`
        let request = serde_json::from_slice::<Option<ScreenshotRequest>>(raw_body)?
            .unwrap_or_default();
        let payload = split_data_url(&request.image_data)?;

        let image = decode_payload(payload).map_err(|e| {
            error!("Failed to decode base64 image for {}: {}", request_id, e);
            AnalysisError::Decode(e)
        })?;

        let prompt = AnalysisPrompt::new(image, ImageFormat::Png, self.prompt.as_str());
        let response = client.generate_content(&prompt).await.map_err(|e| {
            error!("Gemini content generation failed for {}: {}", request_id, e);
            AnalysisError::Upstream(e)
        })?;

        Ok(AnalysisResult {
            analysis: extract_analysis(&response),
        })
    }
}

/// Returns the payload half of `<metadata>,<payload>`.
///
/// Exactly one comma is accepted; zero or several are rejected rather than
/// guessing which comma separates the metadata.
pub fn split_data_url(image_data: &str) -> Result<&str, AnalysisError> {
    let mut segments = image_data.split(',');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_metadata), Some(payload), None) => Ok(payload),
        _ => Err(AnalysisError::InvalidImageData),
    }
}

/// Decodes the base64 payload, skipping line breaks inserted by wrapping encoders.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let unwrapped: String = payload.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    SCREENSHOT_ENGINE.decode(unwrapped)
}

/// Concatenates every text part of every candidate, in response order.
pub fn extract_analysis(response: &GenerateContentResponse) -> String {
    if response.candidates.len() > 1 {
        // All alternatives end up in one analysis; there is no ranking here.
        warn!(
            "Gemini returned {} candidates; concatenating all of them",
            response.candidates.len()
        );
    }

    let mut analysis = String::new();
    for candidate in &response.candidates {
        let Some(content) = &candidate.content else {
            log::debug!(
                "Skipping candidate without content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
            continue;
        };
        for part in &content.parts {
            if let Some(text) = part.as_text() {
                analysis.push_str(text);
            }
        }
    }
    analysis
}
