use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::dto::{
    CropAnalysisRequest, CropAnalysisResponse, InsightChatRequest, InsightChatResponse,
    InterventionRequest, InterventionsResponse, ServicesResponse, SoilAnalysisRequest,
    SoilAnalysisResponse, WeatherRequest, WeatherResponse,
};
use crate::error::ApiError;
use crate::services::insights::{FieldQuery, DEFAULT_SERVICE_TYPE};
use crate::state::AppState;

pub async fn insight_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InsightChatRequest>,
) -> Result<Json<InsightChatResponse>, ApiError> {
    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query is required"))?;

    tracing::info!(
        service_type = request.service_type.as_deref().unwrap_or(DEFAULT_SERVICE_TYPE),
        has_context = request.context.is_some(),
        "Processing AI chat request"
    );

    let data = state.insights.chat(query, request.service_type.as_deref()).await.map_err(|e| {
        tracing::error!(error = %e, "AI chat failed");
        ApiError::internal("AI processing failed").with_details(e.to_string())
    })?;

    Ok(Json(InsightChatResponse {
        success: true,
        data,
        service_type: request.service_type.unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
        timestamp: Utc::now(),
    }))
}

pub async fn analyze_crop(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CropAnalysisRequest>,
) -> Result<Json<CropAnalysisResponse>, ApiError> {
    tracing::info!(
        field_id = ?request.field_id,
        has_satellite_data = request.satellite_data.is_some(),
        "Analyzing crop"
    );

    let analysis = state.insights.analyze_crop(&request.field()).await.map_err(|e| {
        tracing::error!(error = %e, "Crop analysis failed");
        ApiError::internal("Crop analysis failed").with_details(e.to_string())
    })?;

    Ok(Json(CropAnalysisResponse { success: true, analysis, timestamp: Utc::now() }))
}

pub async fn forecast_weather(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<WeatherResponse>, ApiError> {
    tracing::info!(days = ?request.days, "Forecasting weather");

    let weather = state
        .insights
        .forecast_weather(request.latitude, request.longitude, request.days)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Weather forecast failed");
            ApiError::internal("Weather forecast failed").with_details(e.to_string())
        })?;

    Ok(Json(WeatherResponse { success: true, weather, timestamp: Utc::now() }))
}

pub async fn analyze_soil(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SoilAnalysisRequest>,
) -> Result<Json<SoilAnalysisResponse>, ApiError> {
    tracing::info!(
        field_id = ?request.field_id,
        has_sensor_data = request.sensor_data.is_some(),
        "Analyzing soil"
    );

    let field = FieldQuery { field_id: request.field_id, coordinates: None };
    let soil_analysis = state.insights.analyze_soil(&field).await.map_err(|e| {
        tracing::error!(error = %e, "Soil analysis failed");
        ApiError::internal("Soil analysis failed").with_details(e.to_string())
    })?;

    Ok(Json(SoilAnalysisResponse { success: true, soil_analysis, timestamp: Utc::now() }))
}

pub async fn interventions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InterventionRequest>,
) -> Result<Json<InterventionsResponse>, ApiError> {
    tracing::info!(
        field_id = ?request.field_id,
        stress_type = ?request.stress_type,
        "Planning interventions"
    );

    let field = FieldQuery { field_id: request.field_id.clone(), coordinates: None };
    let interventions = state
        .insights
        .interventions(&field, request.stress_type.as_deref(), request.severity.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Intervention planning failed");
            ApiError::internal("Failed to generate interventions").with_details(e.to_string())
        })?;

    Ok(Json(InterventionsResponse { success: true, interventions, timestamp: Utc::now() }))
}

pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<ServicesResponse> {
    Json(ServicesResponse::new(state.insights.services()))
}
