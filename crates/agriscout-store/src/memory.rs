//! In-memory field storage.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.

use agriscout_core::error::{AgriError, Result};
use agriscout_core::models::{DetailsPatch, Land, LandId, Partition, PartitionId, Selection};
use std::sync::{Arc, RwLock};

use crate::ports::FieldStore;

#[derive(Debug, Default)]
struct FieldState {
    lands: Vec<Land>,
    partitions: Vec<Partition>,
    selection: Selection,
}

impl FieldState {
    fn land_mut(&mut self, id: &LandId) -> Result<&mut Land> {
        self.lands
            .iter_mut()
            .find(|land| &land.id == id)
            .ok_or_else(|| AgriError::LandNotFound { id: id.to_string() })
    }

    fn partition_mut(&mut self, id: &PartitionId) -> Result<&mut Partition> {
        self.partitions
            .iter_mut()
            .find(|partition| &partition.id == id)
            .ok_or_else(|| AgriError::PartitionNotFound { id: id.to_string() })
    }

    fn has_land(&self, id: &LandId) -> bool {
        self.lands.iter().any(|land| &land.id == id)
    }

    fn has_partition(&self, id: &PartitionId) -> bool {
        self.partitions.iter().any(|partition| &partition.id == id)
    }

    /// Drop selections that no longer point at a stored entity
    fn prune_selection(&mut self) {
        if let Some(id) = &self.selection.selected_land_id {
            if !self.has_land(id) {
                self.selection.selected_land_id = None;
            }
        }
        if let Some(id) = &self.selection.selected_partition_id {
            if !self.has_partition(id) {
                self.selection.selected_partition_id = None;
            }
        }
    }
}

/// In-memory implementation of FieldStore
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldStore {
    state: Arc<RwLock<FieldState>>,
}

impl MemoryFieldStore {
    /// Create a new, empty in-memory field store
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldStore for MemoryFieldStore {
    fn insert_land(&self, land: Land) -> Result<LandId> {
        let mut state = self.state.write().unwrap();
        let id = land.id.clone();
        state.lands.push(land);
        tracing::debug!(land_id = %id, lands = state.lands.len(), "Land stored");
        Ok(id)
    }

    fn get_land(&self, id: &LandId) -> Result<Option<Land>> {
        let state = self.state.read().unwrap();
        Ok(state.lands.iter().find(|land| &land.id == id).cloned())
    }

    fn list_lands(&self) -> Result<Vec<Land>> {
        let state = self.state.read().unwrap();
        Ok(state.lands.clone())
    }

    fn land_count(&self) -> Result<usize> {
        let state = self.state.read().unwrap();
        Ok(state.lands.len())
    }

    fn update_land(&self, id: &LandId, patch: &DetailsPatch) -> Result<Land> {
        let mut state = self.state.write().unwrap();
        let land = state.land_mut(id)?;
        land.apply(patch);
        Ok(land.clone())
    }

    fn remove_land(&self, id: &LandId) -> Result<Land> {
        let mut state = self.state.write().unwrap();
        let index = state
            .lands
            .iter()
            .position(|land| &land.id == id)
            .ok_or_else(|| AgriError::LandNotFound { id: id.to_string() })?;

        let land = state.lands.remove(index);
        let before = state.partitions.len();
        state.partitions.retain(|partition| &partition.parent_land_id != id);
        state.prune_selection();

        tracing::debug!(
            land_id = %id,
            partitions_removed = before - state.partitions.len(),
            "Land removed"
        );
        Ok(land)
    }

    fn insert_partition(&self, partition: Partition) -> Result<PartitionId> {
        let mut state = self.state.write().unwrap();
        if !state.has_land(&partition.parent_land_id) {
            return Err(AgriError::LandNotFound { id: partition.parent_land_id.to_string() });
        }

        let id = partition.id.clone();
        tracing::debug!(
            partition_id = %id,
            parent_land_id = %partition.parent_land_id,
            "Partition stored"
        );
        state.partitions.push(partition);
        Ok(id)
    }

    fn get_partition(&self, id: &PartitionId) -> Result<Option<Partition>> {
        let state = self.state.read().unwrap();
        Ok(state.partitions.iter().find(|partition| &partition.id == id).cloned())
    }

    fn list_partitions(&self) -> Result<Vec<Partition>> {
        let state = self.state.read().unwrap();
        Ok(state.partitions.clone())
    }

    fn partitions_for_land(&self, land_id: &LandId) -> Result<Vec<Partition>> {
        let state = self.state.read().unwrap();
        Ok(state
            .partitions
            .iter()
            .filter(|partition| &partition.parent_land_id == land_id)
            .cloned()
            .collect())
    }

    fn update_partition(&self, id: &PartitionId, patch: &DetailsPatch) -> Result<Partition> {
        let mut state = self.state.write().unwrap();
        let partition = state.partition_mut(id)?;
        partition.apply(patch);
        Ok(partition.clone())
    }

    fn remove_partition(&self, id: &PartitionId) -> Result<Partition> {
        let mut state = self.state.write().unwrap();
        let index = state
            .partitions
            .iter()
            .position(|partition| &partition.id == id)
            .ok_or_else(|| AgriError::PartitionNotFound { id: id.to_string() })?;

        let partition = state.partitions.remove(index);
        state.prune_selection();
        Ok(partition)
    }

    fn select_land(&self, id: &LandId) -> Result<Selection> {
        let mut state = self.state.write().unwrap();
        if !state.has_land(id) {
            return Err(AgriError::LandNotFound { id: id.to_string() });
        }
        state.selection = Selection::land(id.clone());
        Ok(state.selection.clone())
    }

    fn select_partition(&self, id: &PartitionId) -> Result<Selection> {
        let mut state = self.state.write().unwrap();
        if !state.has_partition(id) {
            return Err(AgriError::PartitionNotFound { id: id.to_string() });
        }
        state.selection = Selection::partition(id.clone());
        Ok(state.selection.clone())
    }

    fn clear_selection(&self) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.selection = Selection::default();
        Ok(())
    }

    fn selection(&self) -> Result<Selection> {
        let state = self.state.read().unwrap();
        Ok(state.selection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriscout_core::models::Ring;
    use proptest::prelude::*;

    fn ring() -> Ring {
        Ring::from(vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]])
    }

    fn land(id: &str) -> Land {
        Land::new(LandId::from(id), id, ring(), 1.0)
    }

    fn partition(id: &str, parent: &str) -> Partition {
        Partition::new(PartitionId::from(id), id, ring(), 0.5, LandId::from(parent))
    }

    #[test]
    fn test_lands_keep_creation_order() {
        let store = MemoryFieldStore::new();
        for id in ["land-c", "land-a", "land-b"] {
            store.insert_land(land(id)).unwrap();
        }

        let ids: Vec<String> =
            store.list_lands().unwrap().into_iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, vec!["land-c", "land-a", "land-b"]);
        assert_eq!(store.land_count().unwrap(), 3);
    }

    #[test]
    fn test_partition_requires_parent() {
        let store = MemoryFieldStore::new();
        let err = store.insert_partition(partition("p-1", "land-missing")).unwrap_err();
        assert!(matches!(err, AgriError::LandNotFound { .. }));
        assert!(store.list_partitions().unwrap().is_empty());
    }

    #[test]
    fn test_partitions_for_land() {
        let store = MemoryFieldStore::new();
        store.insert_land(land("land-1")).unwrap();
        store.insert_land(land("land-2")).unwrap();
        store.insert_partition(partition("p-1", "land-1")).unwrap();
        store.insert_partition(partition("p-2", "land-2")).unwrap();
        store.insert_partition(partition("p-3", "land-1")).unwrap();

        let ids: Vec<String> = store
            .partitions_for_land(&LandId::from("land-1"))
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["p-1", "p-3"]);
    }

    #[test]
    fn test_update_merges_and_unknown_id_errors() {
        let store = MemoryFieldStore::new();
        store.insert_land(land("land-1")).unwrap();

        let patch = DetailsPatch { crop: Some("Wheat".to_string()), ..Default::default() };
        let updated = store.update_land(&LandId::from("land-1"), &patch).unwrap();
        assert_eq!(updated.details.crop.as_deref(), Some("Wheat"));
        assert_eq!(updated.name, "land-1");

        let err = store.update_land(&LandId::from("land-404"), &patch).unwrap_err();
        assert!(err.is_not_found());
        let err = store.update_partition(&PartitionId::from("p-404"), &patch).unwrap_err();
        assert!(matches!(err, AgriError::PartitionNotFound { .. }));
    }

    #[test]
    fn test_remove_land_cascades_and_clears_selection() {
        let store = MemoryFieldStore::new();
        store.insert_land(land("land-1")).unwrap();
        store.insert_land(land("land-2")).unwrap();
        store.insert_partition(partition("p-1", "land-1")).unwrap();
        store.insert_partition(partition("p-2", "land-2")).unwrap();
        store.select_partition(&PartitionId::from("p-1")).unwrap();

        store.remove_land(&LandId::from("land-1")).unwrap();

        let remaining = store.list_partitions().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.as_str(), "p-2");
        assert!(store.selection().unwrap().is_empty());
    }

    #[test]
    fn test_remove_partition_keeps_unrelated_selection() {
        let store = MemoryFieldStore::new();
        store.insert_land(land("land-1")).unwrap();
        store.insert_partition(partition("p-1", "land-1")).unwrap();
        store.select_land(&LandId::from("land-1")).unwrap();

        store.remove_partition(&PartitionId::from("p-1")).unwrap();
        assert_eq!(store.selection().unwrap(), Selection::land(LandId::from("land-1")));
    }

    #[test]
    fn test_select_unknown_is_error_and_keeps_selection() {
        let store = MemoryFieldStore::new();
        store.insert_land(land("land-1")).unwrap();
        store.select_land(&LandId::from("land-1")).unwrap();

        assert!(store.select_partition(&PartitionId::from("p-x")).is_err());
        assert_eq!(store.selection().unwrap(), Selection::land(LandId::from("land-1")));

        store.clear_selection().unwrap();
        assert!(store.selection().unwrap().is_empty());
    }

    #[derive(Debug, Clone)]
    enum SelectOp {
        Land(usize),
        Partition(usize),
        Clear,
    }

    fn select_op() -> impl Strategy<Value = SelectOp> {
        prop_oneof![
            (0usize..3).prop_map(SelectOp::Land),
            (0usize..3).prop_map(SelectOp::Partition),
            Just(SelectOp::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_selection_is_mutually_exclusive(ops in proptest::collection::vec(select_op(), 1..30)) {
            let store = MemoryFieldStore::new();
            for i in 0..3 {
                store.insert_land(land(&format!("land-{i}"))).unwrap();
                store.insert_partition(partition(&format!("p-{i}"), &format!("land-{i}"))).unwrap();
            }

            for op in ops {
                let expected = match &op {
                    SelectOp::Land(i) => {
                        store.select_land(&LandId(format!("land-{i}"))).unwrap();
                        Selection::land(LandId(format!("land-{i}")))
                    }
                    SelectOp::Partition(i) => {
                        store.select_partition(&PartitionId(format!("p-{i}"))).unwrap();
                        Selection::partition(PartitionId(format!("p-{i}")))
                    }
                    SelectOp::Clear => {
                        store.clear_selection().unwrap();
                        Selection::default()
                    }
                };

                let selection = store.selection().unwrap();
                prop_assert!(
                    selection.selected_land_id.is_none() || selection.selected_partition_id.is_none()
                );
                prop_assert_eq!(selection, expected);
            }
        }
    }
}
