use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::prompt::AnalysisPrompt;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl From<&AnalysisPrompt> for GenerateContentRequest {
    fn from(prompt: &AnalysisPrompt) -> Self {
        let image = RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: prompt.format.mime_type().to_string(),
                data: STANDARD.encode(&prompt.image),
            },
        };
        let text = RequestPart::Text {
            text: prompt.instruction.clone(),
        };

        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![image, text],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

/// One piece of returned content. Only `Text` carries analysis output.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    Other(Value),
}

impl ContentPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(text) => Some(text),
            ContentPart::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Some(Value::String(text)) = value.get("text") {
            return Ok(ContentPart::Text(text.clone()));
        }
        Ok(ContentPart::Other(value))
    }
}

/// Google API error envelope, `{"error": {"message", ...}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl ApiErrorEnvelope {
    /// Extracts the error message from a failed response body, falling back to the raw text.
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => envelope.error.message,
            Err(_) => body.trim().to_string(),
        }
    }
}
