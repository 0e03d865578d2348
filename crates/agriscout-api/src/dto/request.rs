use agriscout_core::models::{LandId, PartitionId, Phase};
use serde::Deserialize;
use serde_json::Value;

use crate::services::insights::FieldQuery;

/// Body of `POST /api/ai/chat`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightChatRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

/// Body of `POST /api/ai/crop/analyze`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAnalysisRequest {
    #[serde(default)]
    pub field_id: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Value>,
    #[serde(default)]
    pub satellite_data: Option<Value>,
}

impl CropAnalysisRequest {
    pub fn field(&self) -> FieldQuery {
        FieldQuery { field_id: self.field_id.clone(), coordinates: self.coordinates.clone() }
    }
}

/// Body of `POST /api/ai/weather/forecast`
#[derive(Debug, Default, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub days: Option<usize>,
}

/// Body of `POST /api/ai/soil/analyze`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisRequest {
    #[serde(default)]
    pub field_id: Option<String>,
    #[serde(default)]
    pub sensor_data: Option<Value>,
}

/// Body of `POST /api/ai/interventions`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionRequest {
    #[serde(default)]
    pub field_id: Option<String>,
    #[serde(default)]
    pub stress_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

/// Body of `PUT /api/v1/session/phase`
#[derive(Debug, Deserialize)]
pub struct PhaseRequest {
    pub phase: Phase,
}

/// Body of `POST /api/v1/session/draw/finish`
#[derive(Debug, Default, Deserialize)]
pub struct FinishRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `PUT /api/v1/selection`; neither id clears the selection
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    #[serde(default)]
    pub land_id: Option<LandId>,
    #[serde(default)]
    pub partition_id: Option<PartitionId>,
}

/// Query string of `GET /api/v1/partitions`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionFilter {
    #[serde(default)]
    pub land_id: Option<LandId>,
}

/// Body of `POST /api/v1/assistant/chat`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantChatRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}
