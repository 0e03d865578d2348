use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))

        // Crop insights
        .route("/api/ai/chat", post(handlers::insight_chat))
        .route("/api/ai/crop/analyze", post(handlers::analyze_crop))
        .route("/api/ai/weather/forecast", post(handlers::forecast_weather))
        .route("/api/ai/soil/analyze", post(handlers::analyze_soil))
        .route("/api/ai/interventions", post(handlers::interventions))
        .route("/api/ai/services", get(handlers::list_services))

        // Drawing session
        .route("/api/v1/session", get(handlers::get_session))
        .route("/api/v1/session/phase", put(handlers::set_phase))
        .route("/api/v1/session/advance", post(handlers::advance_phase))
        .route("/api/v1/session/draw/start", post(handlers::start_drawing))
        .route("/api/v1/session/draw/click", post(handlers::click))
        .route("/api/v1/session/draw/undo", post(handlers::undo_point))
        .route("/api/v1/session/draw/finish", post(handlers::finish_drawing))
        .route("/api/v1/session/draw/cancel", post(handlers::cancel_drawing))
        .route("/api/v1/session/location", post(handlers::choose_location))
        .route("/api/v1/session/editor/close", post(handlers::close_editor))

        // Lands and partitions
        .route("/api/v1/lands", get(handlers::list_lands))
        .route("/api/v1/lands/geojson", get(handlers::lands_geojson))
        .route(
            "/api/v1/lands/{land_id}",
            get(handlers::get_land).patch(handlers::update_land).delete(handlers::delete_land),
        )
        .route("/api/v1/partitions", get(handlers::list_partitions))
        .route(
            "/api/v1/partitions/{partition_id}",
            patch(handlers::update_partition).delete(handlers::delete_partition),
        )
        .route("/api/v1/selection", put(handlers::set_selection))

        // Assistant
        .route("/api/v1/assistant/chat", post(handlers::assistant_chat))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
