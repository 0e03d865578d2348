//! Error types for AgriScout

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgriError {
    // Field errors
    #[error("Land not found: {id}")]
    LandNotFound { id: String },

    #[error("Partition not found: {id}")]
    PartitionNotFound { id: String },

    #[error("Invalid ring: {reason}")]
    InvalidRing { reason: String },

    // Upstream service errors
    #[error("Upstream service {service} failed: {reason}")]
    Upstream { service: String, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AgriError {
    /// Shorthand for an upstream failure
    pub fn upstream(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Upstream { service: service.into(), reason: reason.into() }
    }

    /// Whether the error refers to an entity that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LandNotFound { .. } | Self::PartitionNotFound { .. })
    }
}

impl From<serde_json::Error> for AgriError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AgriError>;
