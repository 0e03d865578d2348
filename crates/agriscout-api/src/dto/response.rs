use agriscout_draw::{ClickOutcome, DrawState, Preview};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::services::insights::{
    ChatInsight, CropAnalysis, InterventionPlan, ServiceDescriptor, SoilAnalysis, WeatherReport,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "healthy", service: "AgriScout API", timestamp: Utc::now() }
    }
}

#[derive(Debug, Serialize)]
pub struct EndpointIndex {
    pub health: &'static str,
    pub ai: &'static str,
    pub fields: &'static str,
}

/// Root service descriptor
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: EndpointIndex,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "AgriScout - Smart Field Mapping API",
            version: env!("CARGO_PKG_VERSION"),
            description: "Field boundary mapping with crop insights and an AI assistant",
            endpoints: EndpointIndex { health: "/health", ai: "/api/ai/*", fields: "/api/v1/*" },
        }
    }
}

/// `POST /api/ai/chat` response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightChatResponse {
    pub success: bool,
    pub data: ChatInsight,
    pub service_type: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CropAnalysisResponse {
    pub success: bool,
    pub analysis: CropAnalysis,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub weather: WeatherReport,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisResponse {
    pub success: bool,
    pub soil_analysis: SoilAnalysis,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InterventionsResponse {
    pub success: bool,
    pub interventions: InterventionPlan,
    pub timestamp: DateTime<Utc>,
}

/// Service catalogue keyed by service id
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub success: bool,
    pub services: BTreeMap<&'static str, ServiceDescriptor>,
    pub total_services: usize,
    pub timestamp: DateTime<Utc>,
}

impl ServicesResponse {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        let services: BTreeMap<_, _> = services.into_iter().map(|s| (s.id, s)).collect();
        Self { success: true, total_services: services.len(), services, timestamp: Utc::now() }
    }
}

/// Drawing state after `draw/start`
#[derive(Debug, Serialize)]
pub struct DrawStateResponse {
    pub state: DrawState,
}

/// Drawing preview after `draw/undo`
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub preview: Preview,
}

/// Click result; `lookupPending` is set when a geocode lookup was started
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    #[serde(flatten)]
    pub outcome: ClickOutcome,
    pub lookup_pending: bool,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn success(entity: &str, id: &str) -> Self {
        Self { success: true, message: format!("Successfully deleted {} {}", entity, id) }
    }
}
