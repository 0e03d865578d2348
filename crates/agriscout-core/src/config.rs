use crate::error::{AgriError, Result};
use crate::models::ContainmentMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.pipfactor.com/webhook/apnaketh";
pub const DEFAULT_FALLBACK_CHAT_URL: &str = "http://localhost:3001/api/ai/chat";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for AgriScout
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub port: ConfigValue<u16>,
    pub cors_origins: ConfigValue<Vec<String>>,
    pub webhook_url: ConfigValue<String>,
    pub fallback_chat_url: ConfigValue<String>,
    pub geocoder_url: ConfigValue<String>,
    pub containment_mode: ConfigValue<ContainmentMode>,
    pub request_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            port: ConfigValue::new(DEFAULT_PORT, ConfigSource::Default),
            cors_origins: ConfigValue::new(
                vec![DEFAULT_CORS_ORIGIN.to_string()],
                ConfigSource::Default,
            ),
            webhook_url: ConfigValue::new(DEFAULT_WEBHOOK_URL.to_string(), ConfigSource::Default),
            fallback_chat_url: ConfigValue::new(
                DEFAULT_FALLBACK_CHAT_URL.to_string(),
                ConfigSource::Default,
            ),
            geocoder_url: ConfigValue::new(DEFAULT_GEOCODER_URL.to_string(), ConfigSource::Default),
            containment_mode: ConfigValue::new(ContainmentMode::VertexSampling, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(
                DEFAULT_REQUEST_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| AgriError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| AgriError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }

        if let Some(origins) = file_config.cors_origins {
            self.cors_origins.update(origins, ConfigSource::File);
        }

        if let Some(url) = file_config.webhook_url {
            self.webhook_url.update(url, ConfigSource::File);
        }

        if let Some(url) = file_config.fallback_chat_url {
            self.fallback_chat_url.update(url, ConfigSource::File);
        }

        if let Some(url) = file_config.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::File);
        }

        if let Some(mode) = file_config.containment_mode {
            self.containment_mode.update(mode, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // AGRISCOUT_PORT
        if let Ok(port_str) = env::var("AGRISCOUT_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => self.port.update(port, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AGRISCOUT_PORT value '{}': expected a port number",
                    port_str
                ),
            }
        }

        // AGRISCOUT_CORS_ORIGINS (comma separated)
        if let Ok(origins) = env::var("AGRISCOUT_CORS_ORIGINS") {
            let origins = parse_origin_list(&origins);
            if origins.is_empty() {
                tracing::warn!("AGRISCOUT_CORS_ORIGINS is set but contains no origins");
            } else {
                self.cors_origins.update(origins, ConfigSource::Environment);
            }
        }

        if let Ok(url) = env::var("AGRISCOUT_WEBHOOK_URL") {
            self.webhook_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("AGRISCOUT_FALLBACK_CHAT_URL") {
            self.fallback_chat_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("AGRISCOUT_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        // AGRISCOUT_CONTAINMENT_MODE
        if let Ok(mode_str) = env::var("AGRISCOUT_CONTAINMENT_MODE") {
            match parse_containment_mode(&mode_str) {
                Ok(mode) => self.containment_mode.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AGRISCOUT_CONTAINMENT_MODE value '{}': expected vertex-sampling or strict",
                    mode_str
                ),
            }
        }

        // AGRISCOUT_REQUEST_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("AGRISCOUT_REQUEST_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => {
                    self.request_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid AGRISCOUT_REQUEST_TIMEOUT_SECS value '{}': expected whole seconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(port) = overrides.port {
            self.port.update(port, ConfigSource::Cli);
        }

        if let Some(url) = overrides.webhook_url {
            self.webhook_url.update(url, ConfigSource::Cli);
        }

        if let Some(url) = overrides.fallback_chat_url {
            self.fallback_chat_url.update(url, ConfigSource::Cli);
        }

        if let Some(url) = overrides.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::Cli);
        }

        if let Some(mode) = overrides.containment_mode {
            self.containment_mode.update(mode, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("port".to_string(), (self.port.value.to_string(), self.port.source));

        map.insert(
            "cors_origins".to_string(),
            (self.cors_origins.value.join(","), self.cors_origins.source),
        );

        map.insert(
            "webhook_url".to_string(),
            (self.webhook_url.value.clone(), self.webhook_url.source),
        );

        map.insert(
            "fallback_chat_url".to_string(),
            (self.fallback_chat_url.value.clone(), self.fallback_chat_url.source),
        );

        map.insert(
            "geocoder_url".to_string(),
            (self.geocoder_url.value.clone(), self.geocoder_url.source),
        );

        map.insert(
            "containment_mode".to_string(),
            (
                containment_mode_name(self.containment_mode.value).to_string(),
                self.containment_mode.source,
            ),
        );

        map.insert(
            "request_timeout_secs".to_string(),
            (self.request_timeout_secs.value.to_string(), self.request_timeout_secs.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    port: Option<u16>,
    cors_origins: Option<Vec<String>>,
    webhook_url: Option<String>,
    fallback_chat_url: Option<String>,
    geocoder_url: Option<String>,
    containment_mode: Option<ContainmentMode>,
    request_timeout_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub port: Option<u16>,
    pub webhook_url: Option<String>,
    pub fallback_chat_url: Option<String>,
    pub geocoder_url: Option<String>,
    pub containment_mode: Option<ContainmentMode>,
}

/// Parse containment mode from string
pub fn parse_containment_mode(s: &str) -> Result<ContainmentMode> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "vertex-sampling" | "vertex" | "lenient" => Ok(ContainmentMode::VertexSampling),
        "strict" => Ok(ContainmentMode::Strict),
        _ => Err(AgriError::ConfigInvalid {
            key: "containment_mode".to_string(),
            reason: format!("Invalid containment mode: {}. Use vertex-sampling or strict", s),
        }),
    }
}

fn containment_mode_name(mode: ContainmentMode) -> &'static str {
    match mode {
        ContainmentMode::VertexSampling => "vertex-sampling",
        ContainmentMode::Strict => "strict",
    }
}

/// Split a comma separated origin list, dropping blanks
pub fn parse_origin_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|o| !o.is_empty()).map(String::from).collect()
}
