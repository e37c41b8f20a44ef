use crate::config::{AppConfig, ConfigError};
use crate::gemini::client::{GeminiClient, GeminiError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("failed to create gemini client: {0}")]
    ClientInit(#[from] GeminiError),
}

/// Reads the environment and opens the long-lived Gemini client.
///
/// Runs once per process; any error here must stop the server from starting.
pub fn initialize() -> Result<(AppConfig, GeminiClient), StartupError> {
    initialize_with(AppConfig::from_env)
}

pub fn initialize_with<F>(load_config: F) -> Result<(AppConfig, GeminiClient), StartupError>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    let config = load_config()?;
    let client = GeminiClient::new(config.api_key.clone(), &config.api_base)?;
    Ok((config, client))
}
