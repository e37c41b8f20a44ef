use crate::analysis::prompt::DEFAULT_ANALYSIS_PROMPT;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_PLUGIN_ID: &str = "open-llmengineer2-panel";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "GEMINI_API_KEY environment variable not set. Please configure the API key in the environment"
    )]
    MissingApiKey,
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub analysis_prompt: String,
    pub plugin_id: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("GEMINI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MAX_BODY_BYTES",
                    value,
                })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            api_key,
            api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            analysis_prompt: get("ANALYSIS_PROMPT")
                .unwrap_or_else(|| DEFAULT_ANALYSIS_PROMPT.to_string()),
            plugin_id: get("PLUGIN_ID").unwrap_or_else(|| DEFAULT_PLUGIN_ID.to_string()),
            port,
            max_body_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
