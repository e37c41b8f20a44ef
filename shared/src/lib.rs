use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::Display;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ScreenshotRequest {
    /// Data URL of the captured dashboard, `<metadata>,<base64 payload>`.
    #[serde(rename = "imageData", default, deserialize_with = "deserialize_null_string")]
    pub image_data: String,
}

// Treats an explicit `null` like a missing value
fn deserialize_null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnalysisResult {
    pub analysis: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: String,
}

impl HealthCheckResult {
    pub fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
            message: "ok".to_string(),
        }
    }
}

/// Format hint attached to the image sent for analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screenshot_request_uses_camel_case_field() {
        let request: ScreenshotRequest =
            serde_json::from_str(r#"{"imageData":"data:image/png;base64,AAAA"}"#).unwrap();
        assert_eq!(request.image_data, "data:image/png;base64,AAAA");
    }

    #[test]
    fn missing_image_data_defaults_to_empty() {
        let request: ScreenshotRequest = serde_json::from_str("{}").unwrap();
        assert!(request.image_data.is_empty());
    }

    #[test]
    fn null_image_data_defaults_to_empty() {
        let request: ScreenshotRequest = serde_json::from_str(r#"{"imageData":null}"#).unwrap();
        assert!(request.image_data.is_empty());
    }

    #[test]
    fn health_result_serializes_lowercase_status() {
        let body = serde_json::to_string(&HealthCheckResult::ok()).unwrap();
        assert_eq!(body, r#"{"status":"ok","message":"ok"}"#);
    }

    #[test]
    fn image_format_hint_and_mime() {
        assert_eq!(ImageFormat::Png.to_string(), "png");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }
}
