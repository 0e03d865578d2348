use agriscout_core::error::Result;
use agriscout_core::models::{
    ContainmentMode, Coordinate, DetailsPatch, Land, LandId, Partition, PartitionId, Phase, Ring,
};
use agriscout_core::ports::AreaEstimator;
use agriscout_geo::containment::contains_with_mode;
use agriscout_geo::spatial::ring_bounds;
use agriscout_geo::validation::validate_ring;
use agriscout_store::ports::FieldStore;

use crate::location::{LocationSelection, LookupTicket};
use crate::models::{
    ClickOutcome, DrawError, DrawState, EditingTarget, FinishOutcome, PartitionTarget, Preview,
    RejectReason, SessionSnapshot,
};

/// Drawing session orchestrating the phase, the ring under construction,
/// and commits into the field store.
///
/// The session is single-writer: every operation takes `&mut self` and
/// leaves it in a consistent state whether it succeeds or fails.
pub struct DrawingSession<S, A>
where
    S: FieldStore,
    A: AreaEstimator,
{
    store: S,
    estimator: A,
    containment: ContainmentMode,
    phase: Phase,
    state: DrawState,
    ring: Ring,
    editing: Option<EditingTarget>,
    location: LocationSelection,
}

impl<S, A> DrawingSession<S, A>
where
    S: FieldStore,
    A: AreaEstimator,
{
    /// Create a session in the location phase with vertex-sampling containment
    pub fn new(store: S, estimator: A) -> Self {
        Self {
            store,
            estimator,
            containment: ContainmentMode::default(),
            phase: Phase::default(),
            state: DrawState::Idle,
            ring: Ring::empty(),
            editing: None,
            location: LocationSelection::new(),
        }
    }

    /// Set how partition containment is decided
    pub fn with_containment_mode(mut self, mode: ContainmentMode) -> Self {
        self.containment = mode;
        self
    }

    /// Field store holding committed lands, partitions and the selection
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current onboarding phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// What is being drawn, if anything
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Points of the shape being drawn (empty when idle)
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// How partitions are checked against their land
    pub fn containment_mode(&self) -> ContainmentMode {
        self.containment
    }

    /// Rendering snapshot of the shape being drawn; `None` when idle
    pub fn preview(&self) -> Option<Preview> {
        Preview::of(&self.state, &self.ring)
    }

    /// Switch phase; a shape being drawn is discarded
    pub fn set_phase(&mut self, phase: Phase) {
        if self.state.is_drawing() {
            tracing::info!(from = %self.phase, to = %phase, "Phase change cancels drawing");
            self.reset_drawing();
        }
        self.phase = phase;
    }

    /// Move to the next phase; `Dashboard` stays put
    pub fn advance_phase(&mut self) -> Phase {
        self.set_phase(self.phase.next());
        self.phase
    }

    /// Begin drawing a land or partition, depending on the phase
    pub fn start_drawing(&mut self) -> std::result::Result<&DrawState, DrawError> {
        if self.state.is_drawing() {
            return Err(DrawError::AlreadyDrawing);
        }

        let next = match self.phase {
            Phase::LandSelection => DrawState::DrawingLand,
            Phase::Partitioning => {
                if self.store.land_count()? == 0 {
                    return Err(DrawError::NoLandToPartition);
                }
                DrawState::DrawingPartition
            }
            phase => return Err(DrawError::PhaseDoesNotAllowDrawing { phase }),
        };

        tracing::debug!(phase = %self.phase, state = ?next, "Drawing started");
        self.ring.clear();
        self.state = next;
        Ok(&self.state)
    }

    /// Handle a map click
    pub fn click(&mut self, coordinate: Coordinate) -> ClickOutcome {
        if self.state.is_drawing() {
            self.ring.push(coordinate);
            tracing::debug!(
                lat = coordinate.lat,
                lng = coordinate.lng,
                points = self.ring.len(),
                "Point added"
            );
            return match self.preview() {
                Some(preview) => ClickOutcome::Drawing { preview },
                None => ClickOutcome::Ignored,
            };
        }

        if self.phase == Phase::Location {
            let ticket = self.location.choose(coordinate);
            tracing::debug!(
                lat = coordinate.lat,
                lng = coordinate.lng,
                ticket = ticket.0,
                "Location chosen"
            );
            return ClickOutcome::LocationChosen { coordinate, ticket };
        }

        ClickOutcome::Ignored
    }

    /// Remove the most recent point
    pub fn undo_last_point(&mut self) -> std::result::Result<Preview, DrawError> {
        if !self.state.is_drawing() {
            return Err(DrawError::NotDrawing);
        }
        self.ring.pop();
        self.preview().ok_or(DrawError::NotDrawing)
    }

    /// Commit the shape being drawn.
    ///
    /// With fewer than three points nothing changes. Otherwise the session
    /// returns to idle whether the shape is committed or rejected. A blank
    /// or missing `name` gets a numbered default.
    pub fn finish(&mut self, name: Option<&str>) -> std::result::Result<FinishOutcome, DrawError> {
        if !self.state.is_drawing() {
            return Err(DrawError::NotDrawing);
        }
        if !self.ring.is_polygon() {
            return Ok(FinishOutcome::NeedMorePoints { have: self.ring.len() });
        }

        let validation = validate_ring(&self.ring);
        if !validation.is_valid {
            let detail = validation.summary().unwrap_or_default();
            tracing::info!(detail = %detail, "Drawn ring rejected");
            self.reset_drawing();
            return Ok(FinishOutcome::Rejected { reason: RejectReason::InvalidRing { detail } });
        }

        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let outcome = match std::mem::take(&mut self.state) {
            DrawState::DrawingPartition => self.commit_partition(name),
            _ => self.commit_land(name),
        };
        self.ring.clear();
        Ok(outcome?)
    }

    /// Discard the shape being drawn; returns whether anything was discarded
    pub fn cancel(&mut self) -> bool {
        if !self.state.is_drawing() {
            return false;
        }
        tracing::debug!(points = self.ring.len(), "Drawing cancelled");
        self.reset_drawing();
        true
    }

    fn reset_drawing(&mut self) {
        self.state = DrawState::Idle;
        self.ring.clear();
    }

    fn commit_land(&mut self, name: Option<&str>) -> Result<FinishOutcome> {
        let ring = self.ring.take();
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Land {}", self.store.land_count()? + 1),
        };
        let area = self.estimator.estimate_acres(&ring);
        let land = Land::new(LandId::generate(), name, ring, area);

        self.store.insert_land(land.clone())?;
        self.editing = Some(EditingTarget::Land(land.id.clone()));

        tracing::info!(
            land_id = %land.id,
            name = %land.name,
            area_acres = land.area_acres,
            "Land committed"
        );
        Ok(FinishOutcome::LandCommitted { land })
    }

    /// Land a partition goes into: the selected land at the time of the
    /// call, else the first land
    fn parent_land(&self) -> Result<Option<Land>> {
        if let Some(id) = self.store.selection()?.selected_land_id {
            if let Some(land) = self.store.get_land(&id)? {
                return Ok(Some(land));
            }
        }
        Ok(self.store.list_lands()?.into_iter().next())
    }

    fn commit_partition(&mut self, name: Option<&str>) -> Result<FinishOutcome> {
        let ring = self.ring.take();

        let Some(parent) = self.parent_land()? else {
            tracing::info!("Partition rejected: no parent land");
            return Ok(FinishOutcome::Rejected { reason: RejectReason::MissingParentLand });
        };

        if !contains_with_mode(&parent.ring, &ring, self.containment) {
            tracing::info!(
                parent_land_id = %parent.id,
                mode = ?self.containment,
                "Partition rejected: outside parent land"
            );
            return Ok(FinishOutcome::Rejected {
                reason: RejectReason::OutsideParentLand { parent_land_id: parent.id },
            });
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Partition {}", self.store.partitions_for_land(&parent.id)?.len() + 1),
        };
        let area = self.estimator.estimate_acres(&ring);
        let partition = Partition::new(PartitionId::generate(), name, ring, area, parent.id);

        self.store.insert_partition(partition.clone())?;
        self.editing = Some(EditingTarget::Partition(partition.id.clone()));

        tracing::info!(
            partition_id = %partition.id,
            parent_land_id = %partition.parent_land_id,
            area_acres = partition.area_acres,
            "Partition committed"
        );
        Ok(FinishOutcome::PartitionCommitted { partition })
    }

    /// Entity opened for editing by the last commit, until closed
    pub fn editing_target(&self) -> Option<&EditingTarget> {
        self.editing.as_ref()
    }

    /// Close the detail editor without changing anything
    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    /// Merge details into a land
    pub fn update_land(&mut self, id: &LandId, patch: &DetailsPatch) -> Result<Land> {
        let land = self.store.update_land(id, patch)?;
        tracing::info!(land_id = %id, "Land details updated");
        Ok(land)
    }

    /// Merge details into a partition
    pub fn update_partition(&mut self, id: &PartitionId, patch: &DetailsPatch) -> Result<Partition> {
        let partition = self.store.update_partition(id, patch)?;
        tracing::info!(partition_id = %id, "Partition details updated");
        Ok(partition)
    }

    /// Attach a geocoded address to the chosen location if still current
    pub fn resolve_location(&mut self, ticket: LookupTicket, address: impl Into<String>) -> bool {
        let applied = self.location.resolve(ticket, address);
        if !applied {
            tracing::debug!(ticket = ticket.0, "Stale location lookup ignored");
        }
        applied
    }

    /// Chosen farm location and its address, once resolved
    pub fn location(&self) -> &LocationSelection {
        &self.location
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(SessionSnapshot {
            phase: self.phase,
            state: self.state.clone(),
            preview: self.preview(),
            selection: self.store.selection()?,
            editing: self.editing.clone(),
            location: self.location.current().cloned(),
            land_count: self.store.land_count()?,
            partition_count: self.store.list_partitions()?.len(),
            containment_mode: self.containment,
            target: self.partition_target()?,
        })
    }

    /// Extent of the land new partitions go into, while partitioning
    fn partition_target(&self) -> Result<Option<PartitionTarget>> {
        if self.phase != Phase::Partitioning {
            return Ok(None);
        }
        let target = self.parent_land()?.and_then(|land| {
            ring_bounds(&land.ring).map(|bounds| PartitionTarget {
                land_id: land.id,
                center: bounds.center(),
                bounds,
            })
        });
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriscout_geo::GeodesicAreaEstimator;
    use agriscout_store::MemoryFieldStore;

    type Session = DrawingSession<MemoryFieldStore, GeodesicAreaEstimator>;

    fn session() -> Session {
        DrawingSession::new(MemoryFieldStore::new(), GeodesicAreaEstimator::new())
    }

    fn draw(session: &mut Session, points: &[[f64; 2]]) {
        for p in points {
            session.click(Coordinate::from(*p));
        }
    }

    #[test]
    fn test_start_drawing_depends_on_phase() {
        let mut s = session();
        assert!(matches!(
            s.start_drawing(),
            Err(DrawError::PhaseDoesNotAllowDrawing { phase: Phase::Location })
        ));

        s.set_phase(Phase::Partitioning);
        assert!(matches!(s.start_drawing(), Err(DrawError::NoLandToPartition)));
        assert_eq!(s.state(), &DrawState::Idle);

        s.set_phase(Phase::LandSelection);
        assert_eq!(s.start_drawing().unwrap(), &DrawState::DrawingLand);
        assert!(matches!(s.start_drawing(), Err(DrawError::AlreadyDrawing)));
    }

    #[test]
    fn test_location_click_and_ignored_click() {
        let mut s = session();
        let outcome = s.click(Coordinate::new(28.6, 77.2));
        let ClickOutcome::LocationChosen { ticket, .. } = outcome else {
            panic!("expected location pick, got {outcome:?}");
        };
        assert!(s.resolve_location(ticket, "Delhi"));

        s.set_phase(Phase::Dashboard);
        assert_eq!(s.click(Coordinate::new(1.0, 1.0)), ClickOutcome::Ignored);
        assert!(s.ring().is_empty());
    }

    #[test]
    fn test_undo_last_point() {
        let mut s = session();
        assert!(matches!(s.undo_last_point(), Err(DrawError::NotDrawing)));

        s.set_phase(Phase::LandSelection);
        s.start_drawing().unwrap();
        draw(&mut s, &[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);

        let preview = s.undo_last_point().unwrap();
        assert_eq!(preview.points.len(), 2);
        assert!(!preview.ready_to_finish);
        assert_eq!(s.finish(None).unwrap(), FinishOutcome::NeedMorePoints { have: 2 });
    }

    #[test]
    fn test_finish_when_idle_is_error() {
        let mut s = session();
        assert!(matches!(s.finish(None), Err(DrawError::NotDrawing)));
        assert!(!s.cancel());
    }

    #[test]
    fn test_invalid_ring_is_rejected_not_stored() {
        let mut s = session();
        s.set_phase(Phase::LandSelection);
        s.start_drawing().unwrap();
        draw(&mut s, &[[0.0, 0.0], [0.0, 1.0], [95.0, 1.0]]);

        let outcome = s.finish(None).unwrap();
        assert!(matches!(
            outcome,
            FinishOutcome::Rejected { reason: RejectReason::InvalidRing { .. } }
        ));
        assert_eq!(s.state(), &DrawState::Idle);
        assert_eq!(s.store().land_count().unwrap(), 0);
    }

    #[test]
    fn test_blank_name_gets_default() {
        let mut s = session();
        s.set_phase(Phase::LandSelection);
        s.start_drawing().unwrap();
        draw(&mut s, &[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);

        let FinishOutcome::LandCommitted { land } = s.finish(Some("   ")).unwrap() else {
            panic!("expected land commit");
        };
        assert_eq!(land.name, "Land 1");
        assert!(land.area_acres > 0.0);
        assert_eq!(s.editing_target(), Some(&EditingTarget::Land(land.id.clone())));

        s.close_editor();
        assert!(s.editing_target().is_none());
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut s = session();
        s.set_phase(Phase::LandSelection);
        s.start_drawing().unwrap();
        draw(&mut s, &[[0.0, 0.0], [0.0, 1.0]]);

        let snapshot = s.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::LandSelection);
        assert_eq!(snapshot.state, DrawState::DrawingLand);
        assert_eq!(snapshot.preview.unwrap().points.len(), 2);
        assert_eq!(snapshot.land_count, 0);
        assert_eq!(snapshot.containment_mode, ContainmentMode::VertexSampling);
    }

    fn commit_land(s: &mut Session, min: f64, max: f64) -> Land {
        s.start_drawing().unwrap();
        draw(s, &[[min, min], [min, max], [max, max], [max, min]]);
        let FinishOutcome::LandCommitted { land } = s.finish(None).unwrap() else {
            panic!("expected land commit");
        };
        land
    }

    #[test]
    fn test_partition_parent_follows_selection_at_finish() {
        let mut s = session();
        s.set_phase(Phase::LandSelection);
        let first = commit_land(&mut s, 0.0, 10.0);
        let second = commit_land(&mut s, 20.0, 30.0);

        s.set_phase(Phase::Partitioning);
        s.store().select_land(&first.id).unwrap();
        s.start_drawing().unwrap();
        s.store().select_land(&second.id).unwrap();
        draw(&mut s, &[[22.0, 22.0], [22.0, 24.0], [24.0, 24.0], [24.0, 22.0]]);

        let FinishOutcome::PartitionCommitted { partition } = s.finish(None).unwrap() else {
            panic!("expected partition commit");
        };
        assert_eq!(partition.parent_land_id, second.id);
    }

    #[test]
    fn test_snapshot_target_is_selected_land() {
        let mut s = session();
        s.set_phase(Phase::LandSelection);
        let first = commit_land(&mut s, 0.0, 10.0);
        let second = commit_land(&mut s, 20.0, 30.0);
        assert!(s.snapshot().unwrap().target.is_none());

        s.set_phase(Phase::Partitioning);
        assert_eq!(s.snapshot().unwrap().target.unwrap().land_id, first.id);

        s.store().select_land(&second.id).unwrap();
        let target = s.snapshot().unwrap().target.unwrap();
        assert_eq!(target.land_id, second.id);
        assert_eq!(target.bounds.min_lat, 20.0);
        assert_eq!(target.bounds.max_lng, 30.0);
        assert_eq!(target.center, Coordinate::new(25.0, 25.0));
    }
}
