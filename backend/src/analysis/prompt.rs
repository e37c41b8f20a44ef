use dashlens_shared::ImageFormat;

pub const DEFAULT_ANALYSIS_PROMPT: &str = "Analyze this Grafana dashboard. Describe what metrics and data are being displayed, identify any trends or anomalies, and provide insights about what the dashboard reveals.";

/// Image bytes tagged with a format hint, followed by the instruction text.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    pub image: Vec<u8>,
    pub format: ImageFormat,
    pub instruction: String,
}

impl AnalysisPrompt {
    pub fn new(image: Vec<u8>, format: ImageFormat, instruction: impl Into<String>) -> Self {
        Self {
            image,
            format,
            instruction: instruction.into(),
        }
    }
}
