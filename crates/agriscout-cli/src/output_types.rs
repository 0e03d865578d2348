use agriscout_core::config::ConfigSource;
use agriscout_core::models::{ContainmentMode, Land, Partition};
use agriscout_llm::ReplySource;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

/// Output for check command
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub mode: ContainmentMode,
    pub contained: bool,
    pub outer: RingSummary,
    pub inner: RingSummary,
}

#[derive(Debug, Serialize)]
pub struct RingSummary {
    pub vertices: usize,
    pub area_acres: f64,
    pub errors: Vec<String>,
}

/// Output for replay command
#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub steps: Vec<ReplayStep>,
    pub lands: Vec<Land>,
    pub partitions: Vec<Partition>,
}

/// One replayed event and what it produced
#[derive(Debug, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub event: String,
    pub ok: bool,
    pub outcome: Value,
}

/// Output for geocode command
#[derive(Debug, Serialize)]
pub struct GeocodeOutput {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    /// False when the address is the coordinate fallback
    pub resolved: bool,
}

/// Output for chat command
#[derive(Debug, Serialize)]
pub struct ChatOutput {
    pub reply: String,
    pub source: ReplySource,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}

#[derive(Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl From<&ConfigEntry> for ConfigRow {
    fn from(entry: &ConfigEntry) -> Self {
        Self {
            key: entry.key.clone(),
            value: entry.value.clone(),
            source: format!("{:?}", entry.source),
        }
    }
}

#[derive(Tabled)]
pub struct LandRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Vertices")]
    pub vertices: usize,
    #[tabled(rename = "Area (acres)")]
    pub area: String,
    #[tabled(rename = "Partitions")]
    pub partitions: usize,
}

#[derive(Tabled)]
pub struct PartitionRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Land")]
    pub land: String,
    #[tabled(rename = "Vertices")]
    pub vertices: usize,
    #[tabled(rename = "Area (acres)")]
    pub area: String,
}
