use std::sync::Arc;

use agriscout_core::error::AgriError;
use agriscout_core::models::{DetailsPatch, Land, LandId, Partition, PartitionId, Selection};
use agriscout_store::FieldStore;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use geojson::FeatureCollection;

use crate::dto::{DeleteResponse, PartitionFilter, SelectionRequest};
use crate::error::ApiError;
use crate::services::fields_to_geojson;
use crate::state::AppState;

pub async fn list_lands(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Land>>, ApiError> {
    let session = state.session.read().await;
    Ok(Json(session.store().list_lands()?))
}

pub async fn get_land(
    State(state): State<Arc<AppState>>,
    Path(land_id): Path<String>,
) -> Result<Json<Land>, ApiError> {
    let session = state.session.read().await;
    let land = session
        .store()
        .get_land(&LandId(land_id.clone()))?
        .ok_or(AgriError::LandNotFound { id: land_id })?;
    Ok(Json(land))
}

pub async fn lands_geojson(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let session = state.session.read().await;
    let lands = session.store().list_lands()?;
    let partitions = session.store().list_partitions()?;
    Ok(Json(fields_to_geojson(&lands, &partitions)?))
}

pub async fn update_land(
    State(state): State<Arc<AppState>>,
    Path(land_id): Path<String>,
    Json(patch): Json<DetailsPatch>,
) -> Result<Json<Land>, ApiError> {
    tracing::info!(land_id = %land_id, empty = patch.is_empty(), "Updating land details");

    let land = state.session.write().await.update_land(&LandId(land_id), &patch)?;
    Ok(Json(land))
}

/// Removes the land and its partitions
pub async fn delete_land(
    State(state): State<Arc<AppState>>,
    Path(land_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(land_id = %land_id, "Deleting land");

    let session = state.session.write().await;
    session.store().remove_land(&LandId(land_id.clone()))?;
    Ok(Json(DeleteResponse::success("land", &land_id)))
}

pub async fn list_partitions(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PartitionFilter>,
) -> Result<Json<Vec<Partition>>, ApiError> {
    let session = state.session.read().await;
    let partitions = match &filter.land_id {
        Some(land_id) => {
            if session.store().get_land(land_id)?.is_none() {
                return Err(AgriError::LandNotFound { id: land_id.to_string() }.into());
            }
            session.store().partitions_for_land(land_id)?
        }
        None => session.store().list_partitions()?,
    };
    Ok(Json(partitions))
}

pub async fn update_partition(
    State(state): State<Arc<AppState>>,
    Path(partition_id): Path<String>,
    Json(patch): Json<DetailsPatch>,
) -> Result<Json<Partition>, ApiError> {
    tracing::info!(
        partition_id = %partition_id,
        empty = patch.is_empty(),
        "Updating partition details"
    );

    let partition =
        state.session.write().await.update_partition(&PartitionId(partition_id), &patch)?;
    Ok(Json(partition))
}

pub async fn delete_partition(
    State(state): State<Arc<AppState>>,
    Path(partition_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(partition_id = %partition_id, "Deleting partition");

    let session = state.session.write().await;
    session.store().remove_partition(&PartitionId(partition_id.clone()))?;
    Ok(Json(DeleteResponse::success("partition", &partition_id)))
}

/// Select a land or a partition; an empty body clears the selection
pub async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<Selection>, ApiError> {
    let session = state.session.write().await;
    let store = session.store();

    let selection = match (request.land_id, request.partition_id) {
        (Some(_), Some(_)) => {
            return Err(ApiError::bad_request("Select either a land or a partition, not both"));
        }
        (Some(land_id), None) => store.select_land(&land_id)?,
        (None, Some(partition_id)) => store.select_partition(&partition_id)?,
        (None, None) => {
            store.clear_selection()?;
            Selection::default()
        }
    };

    tracing::info!(selection = ?selection, "Selection changed");
    Ok(Json(selection))
}
