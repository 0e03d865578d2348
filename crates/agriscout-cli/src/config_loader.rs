//! Configuration loading utilities for CLI commands

use agriscout_core::config::{CliConfigOverrides, LayeredConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_ENV: &str = "AGRISCOUT_CONFIG";

/// Config file from `--config`, else from `$AGRISCOUT_CONFIG`
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from))
}

/// Load layered configuration: defaults, file, environment
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(explicit) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides on top
pub fn load_config_with_overrides(
    explicit: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(explicit)?;
    config.update_from_cli(overrides);
    Ok(config)
}

pub fn request_timeout(config: &LayeredConfig) -> Duration {
    Duration::from_secs(config.request_timeout_secs.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriscout_core::config::ConfigSource;
    use std::io::Write;

    #[test]
    fn test_explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 4100").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.port.value, 4100);
        assert_eq!(config.port.source, ConfigSource::File);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/agriscout.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/agriscout.toml"));
    }

    #[test]
    fn test_overrides_win() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "geocoder_url = \"http://file.example/reverse\"").unwrap();

        let overrides = CliConfigOverrides {
            geocoder_url: Some("http://cli.example/reverse".to_string()),
            ..Default::default()
        };
        let config = load_config_with_overrides(Some(file.path()), overrides).unwrap();
        assert_eq!(config.geocoder_url.value, "http://cli.example/reverse");
        assert_eq!(config.geocoder_url.source, ConfigSource::Cli);
    }
}
