use agriscout_core::error::AgriError;
use agriscout_core::models::{
    ContainmentMode, Coordinate, Land, LandId, Partition, PartitionId, Phase, Ring, Selection,
};
use agriscout_geo::spatial::Bounds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::{LookupTicket, SelectedLocation};

/// What the session is currently drawing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DrawState {
    #[default]
    Idle,
    DrawingLand,
    /// The parent land is resolved when the partition is finished
    DrawingPartition,
}

impl DrawState {
    pub fn is_drawing(&self) -> bool {
        !matches!(self, DrawState::Idle)
    }

    fn shape(&self) -> Option<ShapeKind> {
        match self {
            DrawState::Idle => None,
            DrawState::DrawingLand => Some(ShapeKind::Land),
            DrawState::DrawingPartition => Some(ShapeKind::Partition),
        }
    }
}

/// Errors for operations that are not allowed in the current state.
///
/// All of them are recoverable and leave the session unchanged.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Draw a land before adding partitions")]
    NoLandToPartition,

    #[error("Drawing is not available in the {phase} phase")]
    PhaseDoesNotAllowDrawing { phase: Phase },

    #[error("A shape is already being drawn")]
    AlreadyDrawing,

    #[error("No shape is being drawn")]
    NotDrawing,

    #[error(transparent)]
    Store(#[from] AgriError),
}

/// Kind of shape under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Land,
    Partition,
}

/// Rendering hints for the in-progress shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewStyle {
    pub color: String,
    pub fill_opacity: f64,
    pub dash_array: String,
}

impl PreviewStyle {
    pub fn for_kind(kind: ShapeKind) -> Self {
        let color = match kind {
            ShapeKind::Land => "#22c55e",
            ShapeKind::Partition => "#3b82f6",
        };
        Self { color: color.to_string(), fill_opacity: 0.2, dash_array: "10, 5".to_string() }
    }
}

/// Snapshot of the shape being drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub kind: ShapeKind,
    pub points: Ring,
    pub style: PreviewStyle,
    /// An outline is drawn once there are two points
    pub show_outline: bool,
    /// Enough points to commit
    pub ready_to_finish: bool,
}

impl Preview {
    pub(crate) fn of(state: &DrawState, ring: &Ring) -> Option<Self> {
        let kind = state.shape()?;
        Some(Self {
            kind,
            points: ring.clone(),
            style: PreviewStyle::for_kind(kind),
            show_outline: ring.len() >= 2,
            ready_to_finish: ring.is_polygon(),
        })
    }
}

/// Result of a map click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ClickOutcome {
    /// Point appended to the shape being drawn
    Drawing { preview: Preview },
    /// Location picked during the location phase; resolve the address
    /// with the ticket
    LocationChosen { coordinate: Coordinate, ticket: LookupTicket },
    /// Nothing to do with a click in the current state
    Ignored,
}

/// Why a drawn partition was discarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RejectReason {
    /// No land exists to hold the partition
    MissingParentLand,
    /// The partition is not inside its parent land
    OutsideParentLand { parent_land_id: LandId },
    /// The ring has invalid coordinates
    InvalidRing { detail: String },
}

impl RejectReason {
    /// Message for the farmer
    pub fn message(&self) -> String {
        match self {
            RejectReason::MissingParentLand => {
                "Please draw a land first before creating partitions.".to_string()
            }
            RejectReason::OutsideParentLand { .. } => {
                "Partition must be completely inside the selected land. Please try again."
                    .to_string()
            }
            RejectReason::InvalidRing { detail } => format!("The drawn shape is invalid: {}", detail),
        }
    }
}

/// Result of finishing a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum FinishOutcome {
    /// Fewer than three points; keep drawing
    NeedMorePoints { have: usize },
    LandCommitted { land: Land },
    PartitionCommitted { partition: Partition },
    /// Ring discarded, session back to idle
    Rejected { reason: RejectReason },
}

/// Entity opened in the detail editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EditingTarget {
    Land(LandId),
    Partition(PartitionId),
}

/// Read-only view of the whole session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub state: DrawState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
    pub selection: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<EditingTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SelectedLocation>,
    pub land_count: usize,
    pub partition_count: usize,
    pub containment_mode: ContainmentMode,
    /// Land a new partition would go into, while partitioning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PartitionTarget>,
}

/// Land a new partition is checked against, with its map extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionTarget {
    pub land_id: LandId,
    pub bounds: Bounds,
    /// Centre of `bounds`, for recentring the map
    pub center: Coordinate,
}
