use agriscout_core::error::Result;
use agriscout_core::models::{DetailsPatch, Land, LandId, Partition, PartitionId, Selection};

/// Port for land and partition storage.
///
/// Lists are returned in creation order. Selection is part of the store so
/// that removing an entity can clear a selection pointing at it; at most one
/// of land or partition is ever selected.
pub trait FieldStore: Send + Sync {
    /// Store a new land
    fn insert_land(&self, land: Land) -> Result<LandId>;

    /// Retrieve a land by ID
    fn get_land(&self, id: &LandId) -> Result<Option<Land>>;

    /// List all lands in creation order
    fn list_lands(&self) -> Result<Vec<Land>>;

    /// Number of stored lands
    fn land_count(&self) -> Result<usize>;

    /// Merge a patch into a land, returning the updated land
    fn update_land(&self, id: &LandId, patch: &DetailsPatch) -> Result<Land>;

    /// Remove a land together with its partitions
    fn remove_land(&self, id: &LandId) -> Result<Land>;

    /// Store a new partition; its parent land must exist
    fn insert_partition(&self, partition: Partition) -> Result<PartitionId>;

    /// Retrieve a partition by ID
    fn get_partition(&self, id: &PartitionId) -> Result<Option<Partition>>;

    /// List all partitions in creation order
    fn list_partitions(&self) -> Result<Vec<Partition>>;

    /// Partitions of one land, in creation order
    fn partitions_for_land(&self, land_id: &LandId) -> Result<Vec<Partition>>;

    /// Merge a patch into a partition, returning the updated partition
    fn update_partition(&self, id: &PartitionId, patch: &DetailsPatch) -> Result<Partition>;

    /// Remove a partition
    fn remove_partition(&self, id: &PartitionId) -> Result<Partition>;

    /// Select a land, clearing any partition selection
    fn select_land(&self, id: &LandId) -> Result<Selection>;

    /// Select a partition, clearing any land selection
    fn select_partition(&self, id: &PartitionId) -> Result<Selection>;

    /// Clear the selection
    fn clear_selection(&self) -> Result<()>;

    /// Current selection
    fn selection(&self) -> Result<Selection>;
}
