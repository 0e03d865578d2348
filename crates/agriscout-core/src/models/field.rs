//! Lands, partitions and their crop metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinate::Ring;

/// Unique identifier for a land
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandId(pub String);

impl LandId {
    /// Generate a fresh, globally unique land id
    pub fn generate() -> Self {
        Self(format!("land-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LandId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a partition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionId(pub String);

impl PartitionId {
    /// Generate a fresh, globally unique partition id
    pub fn generate() -> Self {
        Self(format!("partition-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartitionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How a plot is watered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationType {
    Drip,
    Sprinkler,
    Flood,
    Rainfed,
    Other,
}

/// Optional crop metadata attached to a land or partition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_variety: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_type: Option<IrrigationType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizers: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pesticides: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for a land or partition.
///
/// `None` leaves a field untouched. A blank string clears a text field,
/// except `name`, which is required and ignores blank values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub crop_variety: Option<String>,
    #[serde(default)]
    pub planted_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub irrigation_type: Option<IrrigationType>,
    #[serde(default)]
    pub fertilizers: Option<String>,
    #[serde(default)]
    pub pesticides: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DetailsPatch {
    /// Patch that only renames
    pub fn rename(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the provided fields into `name` and `details`
    pub fn apply(&self, name: &mut String, details: &mut FieldDetails) {
        if let Some(new_name) = self.name.as_deref().map(str::trim) {
            if !new_name.is_empty() {
                *name = new_name.to_string();
            }
        }

        merge_text(&mut details.crop, &self.crop);
        merge_text(&mut details.crop_variety, &self.crop_variety);
        merge_text(&mut details.fertilizers, &self.fertilizers);
        merge_text(&mut details.pesticides, &self.pesticides);
        merge_text(&mut details.notes, &self.notes);

        if let Some(date) = self.planted_date {
            details.planted_date = Some(date);
        }
        if let Some(date) = self.expected_harvest_date {
            details.expected_harvest_date = Some(date);
        }
        if let Some(irrigation) = self.irrigation_type {
            details.irrigation_type = Some(irrigation);
        }
    }
}

fn merge_text(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        *target = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
    }
}

/// Top-level farmer-owned plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Land {
    pub id: LandId,

    pub name: String,

    /// Boundary as drawn on the map
    #[serde(rename = "coordinates")]
    pub ring: Ring,

    /// Estimated area in acres
    #[serde(rename = "area")]
    pub area_acres: f64,

    #[serde(flatten)]
    pub details: FieldDetails,
}

impl Land {
    pub fn new(id: LandId, name: impl Into<String>, ring: Ring, area_acres: f64) -> Self {
        Self { id, name: name.into(), ring, area_acres, details: FieldDetails::default() }
    }

    pub fn apply(&mut self, patch: &DetailsPatch) {
        patch.apply(&mut self.name, &mut self.details);
    }
}

/// Sub-region of exactly one land.
///
/// The partition references its parent; it does not own it. Containment in
/// the parent is checked once when the partition is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub id: PartitionId,

    pub name: String,

    #[serde(rename = "coordinates")]
    pub ring: Ring,

    #[serde(rename = "area")]
    pub area_acres: f64,

    pub parent_land_id: LandId,

    #[serde(flatten)]
    pub details: FieldDetails,
}

impl Partition {
    pub fn new(
        id: PartitionId,
        name: impl Into<String>,
        ring: Ring,
        area_acres: f64,
        parent_land_id: LandId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            ring,
            area_acres,
            parent_land_id,
            details: FieldDetails::default(),
        }
    }

    pub fn apply(&mut self, patch: &DetailsPatch) {
        patch.apply(&mut self.name, &mut self.details);
    }
}
