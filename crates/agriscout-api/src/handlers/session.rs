use std::sync::Arc;

use agriscout_core::models::{Coordinate, Phase};
use agriscout_draw::{ClickOutcome, FinishOutcome, SessionSnapshot};
use axum::{extract::State, Json};

use crate::dto::{
    CancelResponse, ClickResponse, DrawStateResponse, FinishRequest, PhaseRequest,
    PreviewResponse,
};
use crate::error::ApiError;
use crate::services::spawn_lookup;
use crate::state::AppState;

pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = state.session.read().await;
    Ok(Json(session.snapshot()?))
}

pub async fn set_phase(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PhaseRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    tracing::info!(phase = %request.phase, "Setting phase");

    let mut session = state.session.write().await;
    session.set_phase(request.phase);
    Ok(Json(session.snapshot()?))
}

pub async fn advance_phase(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let mut session = state.session.write().await;
    let phase = session.advance_phase();
    tracing::info!(phase = %phase, "Phase advanced");
    Ok(Json(session.snapshot()?))
}

pub async fn start_drawing(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DrawStateResponse>, ApiError> {
    let mut session = state.session.write().await;
    let draw_state = session.start_drawing()?.clone();
    Ok(Json(DrawStateResponse { state: draw_state }))
}

/// Map click; in the location phase this also starts an address lookup
pub async fn click(
    State(state): State<Arc<AppState>>,
    Json(coordinate): Json<Coordinate>,
) -> Result<Json<ClickResponse>, ApiError> {
    if !coordinate.is_finite() {
        return Err(ApiError::bad_request("Coordinate must be finite"));
    }

    let outcome = state.session.write().await.click(coordinate);
    Ok(Json(respond_to_click(&state, outcome)))
}

/// Location pick; only valid in the location phase
pub async fn choose_location(
    State(state): State<Arc<AppState>>,
    Json(coordinate): Json<Coordinate>,
) -> Result<Json<ClickResponse>, ApiError> {
    if !coordinate.is_finite() {
        return Err(ApiError::bad_request("Coordinate must be finite"));
    }

    let outcome = {
        let mut session = state.session.write().await;
        if session.phase() != Phase::Location {
            return Err(ApiError::conflict(format!(
                "Location can only be chosen in the location phase, not {}",
                session.phase()
            )));
        }
        session.click(coordinate)
    };

    Ok(Json(respond_to_click(&state, outcome)))
}

fn respond_to_click(state: &Arc<AppState>, outcome: ClickOutcome) -> ClickResponse {
    let lookup_pending = match &outcome {
        ClickOutcome::LocationChosen { coordinate, ticket } => {
            tracing::info!(lat = coordinate.lat, lng = coordinate.lng, "Location chosen");
            spawn_lookup(state.clone(), *coordinate, *ticket);
            true
        }
        _ => false,
    };
    ClickResponse { outcome, lookup_pending }
}

pub async fn undo_point(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let preview = state.session.write().await.undo_last_point()?;
    Ok(Json(PreviewResponse { preview }))
}

pub async fn finish_drawing(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FinishRequest>,
) -> Result<Json<FinishOutcome>, ApiError> {
    let outcome = state.session.write().await.finish(request.name.as_deref())?;

    if let FinishOutcome::Rejected { reason } = &outcome {
        tracing::info!(reason = %reason.message(), "Drawing rejected");
    }
    Ok(Json(outcome))
}

pub async fn cancel_drawing(State(state): State<Arc<AppState>>) -> Json<CancelResponse> {
    let cancelled = state.session.write().await.cancel();
    Json(CancelResponse { cancelled })
}

pub async fn close_editor(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let mut session = state.session.write().await;
    session.close_editor();
    Ok(Json(session.snapshot()?))
}
