use agriscout_core::config::LayeredConfig;
use agriscout_core::error::Result;
use agriscout_core::models::ContainmentMode;
use std::env;
use std::time::Duration;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "AGRISCOUT_CONFIG";

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub webhook_url: String,
    pub fallback_chat_url: String,
    pub geocoder_url: String,
    pub containment_mode: ContainmentMode,
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Load defaults, then the file named by `AGRISCOUT_CONFIG`, then
    /// `AGRISCOUT_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut layered = LayeredConfig::with_defaults();
        if let Ok(path) = env::var(CONFIG_FILE_ENV) {
            layered = layered.load_from_file(&path)?;
        }
        Ok(Self::from_layered(&layered.load_from_env()))
    }

    pub fn from_layered(config: &LayeredConfig) -> Self {
        Self {
            port: config.port.value,
            cors_origins: config.cors_origins.value.clone(),
            webhook_url: config.webhook_url.value.clone(),
            fallback_chat_url: config.fallback_chat_url.value.clone(),
            geocoder_url: config.geocoder_url.value.clone(),
            containment_mode: config.containment_mode.value,
            request_timeout: Duration::from_secs(config.request_timeout_secs.value),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_layered(&LayeredConfig::with_defaults())
    }
}
