use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::{LandId, PartitionId};

/// Onboarding phase, in the order the farmer moves through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Pick the farm location on the map
    #[default]
    Location,
    /// Draw land boundaries
    LandSelection,
    /// Draw partitions inside a land
    Partitioning,
    /// Browse lands and partitions
    Dashboard,
}

impl Phase {
    pub const ALL: [Phase; 4] =
        [Phase::Location, Phase::LandSelection, Phase::Partitioning, Phase::Dashboard];

    /// The following phase; `Dashboard` is terminal
    pub fn next(self) -> Phase {
        match self {
            Phase::Location => Phase::LandSelection,
            Phase::LandSelection => Phase::Partitioning,
            Phase::Partitioning | Phase::Dashboard => Phase::Dashboard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Location => "location",
            Phase::LandSelection => "land-selection",
            Phase::Partitioning => "partitioning",
            Phase::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current selection; at most one of land or partition is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selected_land_id: Option<LandId>,
    pub selected_partition_id: Option<PartitionId>,
}

impl Selection {
    pub fn land(id: LandId) -> Self {
        Self { selected_land_id: Some(id), selected_partition_id: None }
    }

    pub fn partition(id: PartitionId) -> Self {
        Self { selected_land_id: None, selected_partition_id: Some(id) }
    }

    pub fn is_empty(&self) -> bool {
        self.selected_land_id.is_none() && self.selected_partition_id.is_none()
    }
}

/// How partition containment in the parent land is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContainmentMode {
    /// Every partition vertex must be inside the land ring.
    /// Edges bulging out between two inside vertices go undetected.
    #[default]
    VertexSampling,
    /// Full polygon-in-polygon containment
    Strict,
}
