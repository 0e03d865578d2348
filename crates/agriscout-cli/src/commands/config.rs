//! Config command implementation

use crate::cli::ConfigArgs;
use crate::config_loader::load_config_with_overrides;
use crate::errors::invalid_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigRow};
use agriscout_core::config::{parse_containment_mode, CliConfigOverrides, LayeredConfig};
use anyhow::Result;
use std::path::Path;

pub fn execute(args: ConfigArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let containment_mode = args
        .containment_mode
        .as_deref()
        .map(parse_containment_mode)
        .transpose()
        .map_err(|e| invalid_config(&e.to_string()))?;

    let overrides = CliConfigOverrides {
        port: args.port,
        webhook_url: args.webhook_url,
        fallback_chat_url: args.fallback_chat_url,
        geocoder_url: args.geocoder_url,
        containment_mode,
    };
    let config = load_config_with_overrides(config_path, overrides)?;
    let entries = entries(&config);

    if output.is_json() {
        return output.result(entries);
    }

    output.section("Effective configuration");
    output.table(entries.iter().map(ConfigRow::from).collect());
    output.info("Precedence: CLI arguments > Environment variables > Config file > Defaults");

    Ok(())
}

/// Configuration entries sorted by key
pub fn entries(config: &LayeredConfig) -> Vec<ConfigEntry> {
    let mut entries: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry { key, value, source })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    entries
}
